//! Human-readable description of a template.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::special::SpecialFile;

/// What one template entry needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescription {
    /// Path relative to the template root, `/`-separated
    pub path: String,
    pub is_dir: bool,
    /// The file is ignored or special, so its content was not scanned
    pub content_excluded: bool,
    pub special: Option<SpecialFile>,
    /// Section-qualified names used in the path and the content
    pub names: Vec<String>,
    /// Function call expressions used in the path and the content
    pub functions: Vec<String>,
    /// Why the content could not be scanned
    pub error: Option<String>,
}

impl EntryDescription {
    fn has_replacements(&self) -> bool {
        self.special.is_some() || !self.names.is_empty() || !self.functions.is_empty()
    }
}

/// Description of a whole template, entry by entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescription {
    pub root: String,
    pub entries: Vec<EntryDescription>,
}

impl TemplateDescription {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: EntryDescription) {
        self.entries.push(entry);
    }

    /// Paths of the special files in the template.
    pub fn special_files(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.special.is_some())
            .map(|entry| entry.path.as_str())
            .collect()
    }

    /// Every function call used, deduplicated and sorted.
    pub fn functions(&self) -> BTreeSet<&str> {
        self.entries.iter().flat_map(|entry| entry.functions.iter().map(String::as_str)).collect()
    }

    /// Names to define grouped by section. The default section is `""`.
    pub fn names_by_section(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut sections: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for name in self.entries.iter().flat_map(|entry| entry.names.iter()) {
            let (section, local) = name.split_once('.').unwrap_or(("", name.as_str()));
            sections.entry(section).or_default().insert(local);
        }
        sections
    }
}

impl fmt::Display for TemplateDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Template: {}", self.root)?;
        writeln!(f)?;

        for entry in &self.entries {
            writeln!(f, "{}", entry.path)?;
            if entry.content_excluded {
                writeln!(f, "\t* The content of the file was excluded from parsing.")?;
            }
            if let Some(error) = &entry.error {
                writeln!(f, "\t* The content could not be scanned: {error}")?;
            }

            if !entry.has_replacements() {
                writeln!(f, "\tNo replacements specified in this path.")?;
                continue;
            }

            writeln!(f, "\tReplacements:")?;
            if let Some(special) = entry.special {
                writeln!(f, "\t\t[special file]         {special}")?;
            }
            for function in &entry.functions {
                writeln!(f, "\t\t[function]             {function}")?;
            }
            for name in &entry.names {
                writeln!(f, "\t\t[needs to be defined]  {name}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Special files used:")?;
        for path in self.special_files() {
            writeln!(f, "\t{path}")?;
        }

        writeln!(f)?;
        writeln!(f, "Replacement functions used:")?;
        for function in self.functions() {
            writeln!(f, "\t{function}")?;
        }

        writeln!(f)?;
        writeln!(f, "Names to be defined:")?;
        for (section, names) in self.names_by_section() {
            let indent = if section.is_empty() {
                "\t"
            } else {
                writeln!(f, "\t[{section}]")?;
                "\t\t"
            };
            for name in names {
                writeln!(f, "{indent}{name}")?;
            }
        }

        Ok(())
    }
}
