//! Requirement scanning.
//!
//! The scanner walks the same syntax as the processors but never evaluates
//! anything. It only collects the raw placeholder names so that a blank
//! configuration or a description of a template can be produced without any
//! values defined.

use std::collections::{BTreeMap, BTreeSet};

use super::content::{CONTENT_CLOSE, CONTENT_OPEN, ESCAPE_CLOSE, ESCAPE_OPEN};
use super::cursor::Cursor;
use super::filename::FILENAME_DELIMITER;
use crate::special::SpecialFile;

/// Section name → local names. The default section is `""`.
pub type SectionMap = BTreeMap<String, BTreeSet<String>>;

/// What a template needs defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    pub sections: SectionMap,
    /// Function call expressions, trimmed and lowercased. Only filled when
    /// [`ScanOptions::include_functions`] is set.
    pub functions: BTreeSet<String>,
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.functions.is_empty()
    }

    /// Section-qualified names (`section.name`, or `name` in the default
    /// section), sorted.
    pub fn qualified_names(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|(section, names)| {
                names.iter().map(move |name| {
                    if section.is_empty() {
                        name.clone()
                    } else {
                        format!("{section}.{name}")
                    }
                })
            })
            .collect()
    }

    pub fn merge(&mut self, other: &Requirements) {
        for (section, names) in &other.sections {
            self.sections.entry(section.clone()).or_default().extend(names.iter().cloned());
        }
        self.functions.extend(other.functions.iter().cloned());
    }

    fn record(&mut self, raw: &str, options: ScanOptions) {
        let name = raw.trim();
        if name.is_empty() {
            return;
        }
        if name.contains('(') {
            if options.include_functions {
                self.functions.insert(name.to_lowercase());
            }
            return;
        }

        let (section, local) = match name.split_once('.') {
            Some((section, local)) => (section.trim().to_lowercase(), local.trim().to_lowercase()),
            None => (String::new(), name.to_lowercase()),
        };
        if local.is_empty() {
            return;
        }
        self.sections.entry(section).or_default().insert(local);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Record function calls in [`Requirements::functions`] instead of
    /// dropping them.
    pub include_functions: bool,
}

/// Collects the names used in a relative path. Function calls are dropped.
pub fn scan_filename(text: &str, requirements: &mut Requirements) {
    scan_filename_with(text, requirements, ScanOptions::default());
}

/// [`scan_filename`] with options.
///
/// A name that turns the whole base name into a special file name
/// (`GITCLONE` for `__GITCLONE__`) is not a requirement.
pub fn scan_filename_with(text: &str, requirements: &mut Requirements, options: ScanOptions) {
    let mut cursor = Cursor::new(text);

    while !cursor.is_eof() {
        if !cursor.starts_with(FILENAME_DELIMITER) {
            cursor.bump();
            continue;
        }

        let mut inner = cursor;
        inner.advance(FILENAME_DELIMITER.len());
        if inner.peek() == Some('_') {
            cursor.bump();
            continue;
        }

        let Some(len) = inner.rest().find(FILENAME_DELIMITER) else {
            cursor.bump();
            continue;
        };

        let raw = &inner.rest()[..len];
        let placeholder = format!("{FILENAME_DELIMITER}{raw}{FILENAME_DELIMITER}");
        if SpecialFile::from_file_name(&placeholder).is_none() {
            requirements.record(raw, options);
        }

        cursor = inner;
        cursor.advance(len + FILENAME_DELIMITER.len());
    }
}

/// Collects the names used in file contents.
///
/// Escaped blocks are skipped. An unterminated `{{` ends the scan, since
/// nothing after it can be a placeholder.
pub fn scan_content(text: &str, requirements: &mut Requirements, options: ScanOptions) {
    let mut cursor = Cursor::new(text);

    while !cursor.is_eof() {
        if cursor.starts_with(ESCAPE_OPEN) {
            let mut inner = cursor;
            inner.advance(ESCAPE_OPEN.len());
            match inner.rest().find(ESCAPE_CLOSE) {
                Some(len) => {
                    cursor = inner;
                    cursor.advance(len + ESCAPE_CLOSE.len());
                }
                None => break,
            }
            continue;
        }

        if !cursor.starts_with(CONTENT_OPEN) {
            cursor.bump();
            continue;
        }

        let mut inner = cursor;
        inner.advance(CONTENT_OPEN.len());
        if inner.peek() == Some('{') {
            cursor.bump();
            continue;
        }

        let Some(len) = inner.rest().find(CONTENT_CLOSE) else {
            break;
        };
        requirements.record(&inner.rest()[..len], options);
        cursor = inner;
        cursor.advance(len + CONTENT_CLOSE.len());
    }
}
