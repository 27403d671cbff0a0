//! Directory generation.
//!
//! This module turns a template directory into a generated project. It walks
//! the template depth-first in file-name order and, for every entry:
//!
//! 1. renders the entry's path relative to the template root with the
//!    filename processor (special files keep their base name)
//! 2. refuses to overwrite an existing path unless `force` is set
//! 3. creates directories, runs special-file handlers, copies ignored files
//!    byte for byte, and renders everything else with the content processor
//!
//! Each entry is processed on its own. A failing entry is logged and counted
//! in the [`GenerationReport`], and the walk carries on with the next one.
//!
//! The non-generating modes live on [`TemplateSource`]:
//! [`TemplateSource::requirements`] lists the names a template needs (for
//! blank configuration files) and [`TemplateSource::describe`] produces a
//! per-entry description.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bpl_cli::generator::{GenerateOptions, Generator};
//! use bpl_cli::pattern::IgnoreRules;
//! use bpl_cli::templating::{NamedValues, TemplateContext};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut values = NamedValues::new();
//! values.add("project", "Widget")?;
//!
//! let mut generator = Generator::new(
//!     "templates/console_app",
//!     "out/widget",
//!     TemplateContext::new(values),
//!     IgnoreRules::new(["png"], ["binfiles"]),
//!     GenerateOptions::default(),
//! )?;
//! let report = generator.generate().await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod describe;

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::{DirEntry, WalkDir};

pub use describe::{EntryDescription, TemplateDescription};

use crate::core::{BplError, FileOperation, FileResultExt};
use crate::pattern::IgnoreRules;
use crate::special::SpecialFile;
use crate::templating::{
    Requirements, ScanOptions, TemplateContext, TemplateError, process_content,
    process_filename, scan_content, scan_filename, scan_filename_with,
};
use crate::utils::fs::{atomic_write, copy_file, ensure_dir, to_forward_slashes};

/// Switches for a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Unresolved placeholders are errors instead of being left in place
    pub strict: bool,
    /// Existing paths in the target are overwritten
    pub force: bool,
}

/// What happened to one template entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryOutcome {
    Directory,
    Rendered,
    Copied,
    Special,
}

/// An entry that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    /// Path of the entry relative to the template root
    pub path: String,
    pub message: String,
}

/// Counts of what a generation run did, plus every failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub directories: usize,
    pub rendered: usize,
    pub copied: usize,
    pub special: usize,
    pub failures: Vec<GenerationFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Directory => self.directories += 1,
            EntryOutcome::Rendered => self.rendered += 1,
            EntryOutcome::Copied => self.copied += 1,
            EntryOutcome::Special => self.special += 1,
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directories, {} files rendered, {} files copied, {} special files",
            self.directories, self.rendered, self.copied, self.special
        )?;
        if !self.failures.is_empty() {
            write!(f, ", {} failures", self.failures.len())?;
        }
        Ok(())
    }
}

/// A template directory on disk together with its ignore rules.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    root: PathBuf,
    ignore: IgnoreRules,
}

impl TemplateSource {
    /// # Errors
    ///
    /// [`BplError::SourceMissing`] if `root` does not exist.
    pub fn new(root: impl Into<PathBuf>, ignore: IgnoreRules) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(BplError::SourceMissing {
                path: root.display().to_string(),
            }
            .into());
        }
        Ok(Self {
            root,
            ignore,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entries below the root, depth-first, sorted by file name, links not
    /// followed.
    fn walk(&self) -> walkdir::IntoIter {
        WalkDir::new(&self.root).min_depth(1).follow_links(false).sort_by_file_name().into_iter()
    }

    fn relative_text(&self, path: &Path) -> Result<String> {
        let relative = path.strip_prefix(&self.root).with_context(|| {
            format!("{} is not inside {}", path.display(), self.root.display())
        })?;
        Ok(to_forward_slashes(relative))
    }

    /// Whether the content of `entry` is excluded from parsing. Directories
    /// are checked too, so that their ignore status reaches their children.
    fn is_excluded(&mut self, entry: &DirEntry) -> (bool, Option<SpecialFile>) {
        let special = special_file(entry);
        if special.is_some() {
            return (true, special);
        }
        (self.ignore.is_ignored(entry.path()), None)
    }

    /// Every name the template needs defined, with function calls left out.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be listed or read.
    pub fn requirements(&mut self) -> Result<Requirements> {
        let mut requirements = Requirements::new();

        for entry in self.walk() {
            let entry = entry.context("Failed to walk the template directory")?;
            scan_filename(&self.relative_text(entry.path())?, &mut requirements);

            let (excluded, _) = self.is_excluded(&entry);
            if entry.file_type().is_dir() || excluded {
                continue;
            }

            let content = std::fs::read_to_string(entry.path()).with_file_context(
                FileOperation::Read,
                entry.path(),
                "scanning template placeholders",
            )?;
            scan_content(&content, &mut requirements, ScanOptions::default());
        }

        Ok(requirements)
    }

    /// Describes every entry of the template. A file that cannot be scanned
    /// is reported in its entry and does not stop the description.
    pub fn describe(&mut self) -> Result<TemplateDescription> {
        let options = ScanOptions {
            include_functions: true,
        };
        let mut description = TemplateDescription::new(self.root.display().to_string());

        for entry in self.walk() {
            let entry = entry.context("Failed to walk the template directory")?;
            let path = self.relative_text(entry.path())?;
            let is_dir = entry.file_type().is_dir();
            let (excluded, special) = self.is_excluded(&entry);

            let mut requirements = Requirements::new();
            scan_filename_with(&path, &mut requirements, options);

            let mut scan_error = None;
            if !is_dir && !excluded {
                match std::fs::read_to_string(entry.path()) {
                    Ok(content) => scan_content(&content, &mut requirements, options),
                    Err(e) => scan_error = Some(format!("Failed to read file: {e}")),
                }
            }

            description.push(EntryDescription {
                path,
                is_dir,
                content_excluded: excluded && !is_dir,
                special,
                names: requirements.qualified_names(),
                functions: requirements.functions.iter().cloned().collect(),
                error: scan_error,
            });
        }

        Ok(description)
    }
}

fn special_file(entry: &DirEntry) -> Option<SpecialFile> {
    if entry.file_type().is_dir() {
        return None;
    }
    SpecialFile::from_path(entry.path())
}

/// Generates one target tree from one template.
#[derive(Debug)]
pub struct Generator {
    source: TemplateSource,
    target: PathBuf,
    context: TemplateContext,
    options: GenerateOptions,
}

impl Generator {
    /// # Errors
    ///
    /// - [`BplError::SourceMissing`] if `source` does not exist
    /// - [`BplError::TargetInsideSource`] if `target` is `source` or lies
    ///   below it
    pub fn new(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        context: TemplateContext,
        ignore: IgnoreRules,
        options: GenerateOptions,
    ) -> Result<Self> {
        let source = TemplateSource::new(source, ignore)?;
        let target = target.into();

        let source_abs = std::path::absolute(source.root())
            .with_context(|| format!("Failed to resolve {}", source.root().display()))?;
        let target_abs = std::path::absolute(&target)
            .with_context(|| format!("Failed to resolve {}", target.display()))?;
        if target_abs.starts_with(&source_abs) {
            return Err(BplError::TargetInsideSource {
                source_dir: source_abs.display().to_string(),
                target_dir: target_abs.display().to_string(),
            }
            .into());
        }

        Ok(Self {
            source,
            target,
            context,
            options,
        })
    }

    pub fn context(&self) -> &TemplateContext {
        &self.context
    }

    pub fn options(&self) -> GenerateOptions {
        self.options
    }

    /// Walks the template and writes the target tree.
    ///
    /// # Errors
    ///
    /// Only fails if the target root cannot be created. Failures of single
    /// entries end up in [`GenerationReport::failures`].
    pub async fn generate(&mut self) -> Result<GenerationReport> {
        ensure_dir(&self.target)?;
        info!(
            target: "generate",
            "Generating {} from {}",
            self.target.display(),
            self.source.root().display()
        );

        let mut report = GenerationReport::default();
        for entry in self.source.walk() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    error!(target: "generate", "Failed to read {}: {}", path, e);
                    report.failures.push(GenerationFailure {
                        path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            match self.generate_entry(&entry).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    let path = self
                        .source
                        .relative_text(entry.path())
                        .unwrap_or_else(|_| entry.path().display().to_string());
                    let message = format!("{e:#}");
                    error!(target: "generate", "{}: {}", path, message);
                    report.failures.push(GenerationFailure {
                        path,
                        message,
                    });
                }
            }
        }

        info!(target: "generate", "Finished: {}", report);
        Ok(report)
    }

    async fn generate_entry(&mut self, entry: &DirEntry) -> Result<EntryOutcome> {
        let source_path = entry.path();
        let (excluded, special) = self.source.is_excluded(entry);
        let target_path = self.target_path(source_path, special)?;

        if !self.options.force && target_path.exists() {
            return Err(BplError::PathConflict {
                path: target_path.display().to_string(),
            }
            .into());
        }

        if entry.file_type().is_dir() {
            ensure_dir(&target_path)?;
            info!(target: "generate", "Created directory {}", target_path.display());
            return Ok(EntryOutcome::Directory);
        }

        if let Some(special) = special {
            debug!(target: "generate", "Handing {} to {}", source_path.display(), special);
            special.handle(source_path, &target_path).await?;
            return Ok(EntryOutcome::Special);
        }

        if excluded {
            copy_file(source_path, &target_path)?;
            info!(target: "generate", "Copied {}", target_path.display());
            return Ok(EntryOutcome::Copied);
        }

        let content = tokio::fs::read_to_string(source_path).await.with_file_context(
            FileOperation::Read,
            source_path,
            "rendering template content",
        )?;
        let rendered = process_content(&content, &self.context, self.options.strict)
            .map_err(|e| located(&e, &content))?;
        atomic_write(&target_path, rendered.as_bytes())?;
        info!(target: "generate", "Created file {}", target_path.display());
        Ok(EntryOutcome::Rendered)
    }

    /// Where `source_path` ends up in the target tree.
    fn target_path(&self, source_path: &Path, special: Option<SpecialFile>) -> Result<PathBuf> {
        let relative = self.source.relative_text(source_path)?;

        let rendered = match special {
            Some(special) => {
                let parent = relative.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("");
                let parent = process_filename(parent, &self.context, self.options.strict)
                    .map_err(|e| located(&e, parent))?;
                if parent.is_empty() {
                    special.file_name().to_string()
                } else {
                    format!("{parent}/{}", special.file_name())
                }
            }
            None => process_filename(&relative, &self.context, self.options.strict)
                .map_err(|e| located(&e, &relative))?,
        };

        let rendered = Path::new(&rendered);
        let escapes = rendered
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(BplError::Other {
                message: format!(
                    "'{relative}' renders to '{}', which is not a path inside the target",
                    rendered.display()
                ),
            }
            .into());
        }

        Ok(self.target.join(rendered))
    }
}

fn located(error: &TemplateError, text: &str) -> anyhow::Error {
    anyhow::Error::msg(error.format_with_context(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::NamedValues;
    use crate::test_utils::TemplateTree;
    use std::fs;
    use tempfile::TempDir;

    fn context(pairs: &[(&str, &str)]) -> TemplateContext {
        let mut values = NamedValues::new();
        for (name, value) in pairs {
            values.add(name, value).unwrap();
        }
        TemplateContext::new(values)
    }

    fn generator(
        tree: &TemplateTree,
        target: &Path,
        pairs: &[(&str, &str)],
        ignore: IgnoreRules,
        options: GenerateOptions,
    ) -> Generator {
        Generator::new(tree.path(), target, context(pairs), ignore, options).unwrap()
    }

    #[tokio::test]
    async fn test_generate_renders_names_and_content() {
        crate::test_utils::init_test_logging(None);
        let tree = TemplateTree::new()
            .file("__project__/src/__Project__.cs", "namespace {{Project}} { /* {{PROJECT}} */ }")
            .file("README.md", "# {{project}}\n{{{{not_a_value}}}}\n");
        let out = TempDir::new().unwrap();
        let target = out.path().join("generated");

        let mut generator = generator(
            &tree,
            &target,
            &[("Project", "Widget")],
            IgnoreRules::default(),
            GenerateOptions::default(),
        );
        let report = generator.generate().await.unwrap();

        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(report.directories, 2);
        assert_eq!(report.rendered, 2);
        assert_eq!(
            fs::read_to_string(target.join("widget/src/Widget.cs")).unwrap(),
            "namespace Widget { /* WIDGET */ }"
        );
        assert_eq!(
            fs::read_to_string(target.join("README.md")).unwrap(),
            "# widget\n{{not_a_value}}\n"
        );
    }

    #[tokio::test]
    async fn test_non_strict_leaves_unknown_placeholders() {
        let tree = TemplateTree::new().file("__unknown__.txt", "{{unknown}} and {{name}}");
        let out = TempDir::new().unwrap();

        let mut generator = generator(
            &tree,
            out.path(),
            &[("name", "x")],
            IgnoreRules::default(),
            GenerateOptions::default(),
        );
        let report = generator.generate().await.unwrap();

        assert!(report.is_success());
        assert_eq!(
            fs::read_to_string(out.path().join("__unknown__.txt")).unwrap(),
            "{{unknown}} and x"
        );
    }

    #[tokio::test]
    async fn test_strict_failure_does_not_stop_the_walk() {
        let tree = TemplateTree::new()
            .file("a_bad.txt", "line one\nvalue {{missing}}\n")
            .file("b_good.txt", "{{name}}");
        let out = TempDir::new().unwrap();

        let mut generator = generator(
            &tree,
            out.path(),
            &[("name", "ok")],
            IgnoreRules::default(),
            GenerateOptions {
                strict: true,
                force: false,
            },
        );
        let report = generator.generate().await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, "a_bad.txt");
        assert!(report.failures[0].message.contains("missing"));
        assert!(report.failures[0].message.contains("line 2"));
        assert!(!out.path().join("a_bad.txt").exists());
        assert_eq!(fs::read_to_string(out.path().join("b_good.txt")).unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_ignored_directory_propagates_to_children() {
        let tree = TemplateTree::new()
            .file("binfiles/tool/__name__.dll", "{{name}} stays")
            .file("src/main.txt", "{{name}}");
        let out = TempDir::new().unwrap();

        let mut generator = generator(
            &tree,
            out.path(),
            &[("name", "widget")],
            IgnoreRules::new(Vec::<String>::new(), ["binfiles"]),
            GenerateOptions::default(),
        );
        let report = generator.generate().await.unwrap();

        assert!(report.is_success());
        assert_eq!(report.copied, 1);
        // Names are still processed, contents are not
        assert_eq!(
            fs::read_to_string(out.path().join("binfiles/tool/widget.dll")).unwrap(),
            "{{name}} stays"
        );
        assert_eq!(fs::read_to_string(out.path().join("src/main.txt")).unwrap(), "widget");
    }

    #[tokio::test]
    async fn test_existing_path_conflicts_without_force() {
        let tree = TemplateTree::new().file("file.txt", "{{name}}");
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("file.txt"), "keep me").unwrap();

        let mut first = generator(
            &tree,
            out.path(),
            &[("name", "new")],
            IgnoreRules::default(),
            GenerateOptions::default(),
        );
        let report = first.generate().await.unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].message.contains("already exists"));
        assert_eq!(fs::read_to_string(out.path().join("file.txt")).unwrap(), "keep me");

        let mut forced = generator(
            &tree,
            out.path(),
            &[("name", "new")],
            IgnoreRules::default(),
            GenerateOptions {
                strict: false,
                force: true,
            },
        );
        assert!(forced.generate().await.unwrap().is_success());
        assert_eq!(fs::read_to_string(out.path().join("file.txt")).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_guid_is_stable_across_files() {
        let tree = TemplateTree::new()
            .file("a.txt", "{{GUID(1)}}")
            .file("b.txt", "{{guid(1)}} {{GUID(2)}}");
        let out = TempDir::new().unwrap();

        let mut generator =
            generator(&tree, out.path(), &[], IgnoreRules::default(), GenerateOptions::default());
        assert!(generator.generate().await.unwrap().is_success());

        let a = fs::read_to_string(out.path().join("a.txt")).unwrap();
        let b = fs::read_to_string(out.path().join("b.txt")).unwrap();
        let (first, second) = b.split_once(' ').unwrap();
        assert_eq!(a, first);
        assert_ne!(first, second);
        assert_eq!(a.len(), 36);
    }

    #[tokio::test]
    async fn test_invalid_special_file_is_a_failure() {
        let tree = TemplateTree::new().file("vendor/__GITCLONE__", "").file("z.txt", "z");
        let out = TempDir::new().unwrap();

        let mut generator =
            generator(&tree, out.path(), &[], IgnoreRules::default(), GenerateOptions::default());
        let report = generator.generate().await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, "vendor/__GITCLONE__");
        assert!(!out.path().join("vendor/__GITCLONE__").exists());
        assert!(out.path().join("z.txt").exists());
    }

    #[test]
    fn test_special_file_keeps_its_name_under_a_rendered_parent() {
        let tree = TemplateTree::new()
            .file("__name__/__GITCLONE__", "https://example.com/lib.git\n")
            .file("__GITCLONE__", "https://example.com/root.git\n");
        let out = TempDir::new().unwrap();
        let strict = GenerateOptions {
            strict: true,
            force: false,
        };

        let generator =
            generator(&tree, out.path(), &[("name", "widget")], IgnoreRules::default(), strict);

        let nested = generator
            .target_path(&tree.join("__name__/__GITCLONE__"), Some(SpecialFile::GitClone))
            .unwrap();
        assert_eq!(nested, out.path().join("widget").join("__GITCLONE__"));

        let top = generator
            .target_path(&tree.join("__GITCLONE__"), Some(SpecialFile::GitClone))
            .unwrap();
        assert_eq!(top, out.path().join("__GITCLONE__"));

        // Without the special-file rule the base name is an unknown placeholder
        let err = generator.target_path(&tree.join("__GITCLONE__"), None).unwrap_err();
        assert!(err.to_string().contains("GITCLONE"));
    }

    #[tokio::test]
    async fn test_rendered_path_must_stay_inside_target() {
        let tree = TemplateTree::new().file("__dir__/x.txt", "x");
        let out = TempDir::new().unwrap();

        let mut generator = generator(
            &tree,
            &out.path().join("t"),
            &[("dir", "..")],
            IgnoreRules::default(),
            GenerateOptions::default(),
        );
        let report = generator.generate().await.unwrap();
        assert_eq!(report.failures.len(), 2);
        assert!(!out.path().join("x.txt").exists());
    }

    #[test]
    fn test_missing_source_and_target_inside_source() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let err = Generator::new(
            &missing,
            temp.path().join("out"),
            context(&[]),
            IgnoreRules::default(),
            GenerateOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err.downcast_ref::<BplError>(), Some(BplError::SourceMissing { .. })));

        let err = Generator::new(
            temp.path(),
            temp.path().join("nested/out"),
            context(&[]),
            IgnoreRules::default(),
            GenerateOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BplError>(),
            Some(BplError::TargetInsideSource { .. })
        ));
    }

    #[test]
    fn test_requirements_skip_ignored_and_special_content() {
        let tree = TemplateTree::new()
            .file("__Project__/__author.email__.txt", "{{Version}} {{GUID(0)}} {{{{escaped}}}}")
            .file("assets/logo.png", "{{not_scanned}}")
            .file("lib/__GITCLONE__", "{{not_scanned_either}}");
        let mut source =
            TemplateSource::new(tree.path(), IgnoreRules::new(["png"], Vec::<String>::new()))
                .unwrap();

        let requirements = source.requirements().unwrap();
        assert_eq!(
            requirements.qualified_names(),
            vec!["project".to_string(), "version".to_string(), "author.email".to_string()]
        );
        assert!(requirements.functions.is_empty());
    }

    #[test]
    fn test_requirements_fail_on_unreadable_file() {
        let tree = TemplateTree::new().bytes("data.bin", &[0xff, 0xfe, 0x00]);
        let mut source = TemplateSource::new(tree.path(), IgnoreRules::default()).unwrap();
        assert!(source.requirements().is_err());
    }
}
