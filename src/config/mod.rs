//! Template configuration.
//!
//! A configuration supplies the named values of a generation run and the
//! ignore lists for its template. It comes from up to three places, merged in
//! this order:
//!
//! 1. a configuration file, INI or JSON (chosen by the `.json` extension)
//! 2. the `--values "name=value,..."` inline list
//! 3. the `--extensions-to-ignore` and `--files-to-ignore` lists
//!
//! Defining the same name twice, in one source or across sources, is an
//! error. Ignore lists are concatenated.
//!
//! # INI format
//!
//! ```ini
//! ; comment
//! extensions_to_ignore = png, dll
//! files_to_ignore = binfiles, *.min.js
//! project = Widget
//!
//! [author]
//! name = Jane Doe
//! ```
//!
//! Values in a `[section]` are named `section.key`.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "extensions_to_ignore": "png, dll",
//!   "files_to_ignore": "binfiles",
//!   "named_values": [{ "name": "project", "value": "Widget" }],
//!   "sections": [
//!     { "name": "author", "named_values": [{ "name": "name", "value": "Jane Doe" }] }
//!   ]
//! }
//! ```
//!
//! Every key is optional. A section with an empty name holds unscoped values.
//!
//! # Blank configurations
//!
//! [`writer`] produces an empty configuration in either format from the
//! [`Requirements`](crate::templating::Requirements) of a template, ready to
//! be filled in.

pub mod ini;
pub mod inline;
pub mod json;
pub mod writer;

use anyhow::Result;
use std::path::Path;

use crate::core::{BplError, FileOperation, FileResultExt};
use crate::pattern::IgnoreRules;
use crate::templating::{NamedValues, TemplateError};

pub use inline::parse_inline_values;
pub use writer::blank_config;

/// Key of the extension ignore list, at the top level of both formats.
pub const EXTENSIONS_TO_IGNORE: &str = "extensions_to_ignore";
/// Key of the file ignore list, at the top level of both formats.
pub const FILES_TO_IGNORE: &str = "files_to_ignore";

/// The two file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Ini,
    Json,
}

impl ConfigFormat {
    /// JSON for a `.json` extension in any case, INI for everything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(extension) if extension.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Ini,
        }
    }
}

/// Named values and ignore lists for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateConfig {
    pub extensions_to_ignore: Vec<String>,
    pub files_to_ignore: Vec<String>,
    /// `(name, value)` in definition order; section values are `section.key`
    pub values: Vec<(String, String)>,
}

impl TemplateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// [`BplError::ConfigNotFound`] if `path` does not exist,
    /// [`BplError::ConfigParseError`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BplError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).with_file_context(
            FileOperation::Read,
            path,
            "loading template configuration",
        )?;
        let file = path.display().to_string();
        let config = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => json::parse_json(&content, &file)?,
            ConfigFormat::Ini => ini::parse_ini(&content, &file)?,
        };

        tracing::debug!(
            "Loaded {} values from {} ({} extensions, {} file patterns ignored)",
            config.values.len(),
            file,
            config.extensions_to_ignore.len(),
            config.files_to_ignore.len()
        );
        Ok(config)
    }

    /// Appends `name=value,...` pairs given on the command line.
    pub fn add_inline_values(&mut self, text: &str) -> Result<(), BplError> {
        self.values.extend(parse_inline_values(text)?);
        Ok(())
    }

    /// Appends comma-separated ignore lists given on the command line.
    pub fn add_ignores(&mut self, extensions: Option<&str>, files: Option<&str>) {
        if let Some(extensions) = extensions {
            self.extensions_to_ignore.extend(split_list(extensions));
        }
        if let Some(files) = files {
            self.files_to_ignore.extend(split_list(files));
        }
    }

    /// Builds the value store.
    ///
    /// # Errors
    ///
    /// [`TemplateError::DuplicateKey`] if a name is defined twice.
    pub fn named_values(&self) -> Result<NamedValues, TemplateError> {
        let mut values = NamedValues::new();
        for (name, value) in &self.values {
            values.add(name, value)?;
        }
        Ok(values)
    }

    pub fn ignore_rules(&self) -> IgnoreRules {
        IgnoreRules::new(&self.extensions_to_ignore, &self.files_to_ignore)
    }
}

/// Splits a comma-separated list, trimming and lowercasing the entries and
/// dropping empty ones.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Joins a list the way [`split_list`] reads it back.
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}
