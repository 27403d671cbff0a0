//! Special files.
//!
//! A template file whose base name is exactly a special name is not copied
//! or rendered. Its handler runs instead, with the path of the file in the
//! template and the path it would have had in the generated tree.
//!
//! | File name      | Handler                                                  |
//! |----------------|----------------------------------------------------------|
//! | `__GITCLONE__` | shallow clone of the URL in the file into its directory |
//!
//! The `.git` directory of a clone is renamed to `.original_dot_git`, so the
//! generated project does not silently inherit the cloned repository's
//! history and remotes.

use anyhow::Result;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use crate::core::{BplError, FileOperation, FileResultExt};

/// Name the cloned `.git` directory is moved to.
pub const ORIGINAL_DOT_GIT: &str = ".original_dot_git";

/// The closed set of special files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialFile {
    /// `__GITCLONE__`: one line holding a repository URL
    GitClone,
}

impl SpecialFile {
    pub const ALL: [SpecialFile; 1] = [SpecialFile::GitClone];

    /// The exact base name that marks this special file.
    pub const fn file_name(self) -> &'static str {
        match self {
            SpecialFile::GitClone => "__GITCLONE__",
        }
    }

    /// Matches a base name exactly, case included.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|special| special.file_name() == name)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name().and_then(|name| name.to_str()).and_then(Self::from_file_name)
    }

    /// Runs the handler for the special file at `source`, whose generated
    /// path would be `target`.
    pub async fn handle(self, source: &Path, target: &Path) -> Result<()> {
        match self {
            SpecialFile::GitClone => git_clone(source, target).await,
        }
    }
}

impl fmt::Display for SpecialFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Reads the single URL line of a `__GITCLONE__` file.
pub fn parse_clone_url(content: &str, source: &Path) -> Result<String, BplError> {
    let lines: Vec<&str> =
        content.lines().map(str::trim).filter(|line| !line.is_empty()).collect();

    match lines.as_slice() {
        [url] => Ok((*url).to_string()),
        [] => Err(BplError::SpecialFileInvalid {
            path: source.display().to_string(),
            reason: "the file is empty, expected a repository URL".to_string(),
        }),
        _ => Err(BplError::SpecialFileInvalid {
            path: source.display().to_string(),
            reason: format!("expected exactly one line with a repository URL, found {}", lines.len()),
        }),
    }
}

async fn git_clone(source: &Path, target: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(source).await.with_file_context(
        FileOperation::Read,
        source,
        "__GITCLONE__ repository URL",
    )?;
    let url = parse_clone_url(&content, source)?;

    let target_dir = target.parent().unwrap_or_else(|| Path::new("."));
    info!(target: "special", "Cloning {} into {}", url, target_dir.display());
    crate::git::shallow_clone(&url, target_dir).await?;

    warn!(
        target: "special",
        "Cloned {} into {}. The clone is not verified, check the result before using it",
        url,
        target_dir.display()
    );

    let dot_git = target_dir.join(".git");
    if dot_git.exists() {
        let renamed = target_dir.join(ORIGINAL_DOT_GIT);
        tokio::fs::rename(&dot_git, &renamed).await.with_file_context(
            FileOperation::Rename,
            &dot_git,
            "moving the cloned .git directory aside",
        )?;
        info!(target: "special", "Moved {} to {}", dot_git.display(), renamed.display());
    }

    Ok(())
}
