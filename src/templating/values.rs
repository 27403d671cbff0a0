//! Named values used for placeholder substitution.
//!
//! Names are not case sensitive and values are. When a value is substituted,
//! the spelling of the name in the template decides the case of the result:
//!
//! - a name written all in lowercase yields the lowercased value
//! - a name written all in uppercase yields the uppercased value
//! - any other spelling yields the value as stored
//!
//! A name with no letters counts as lowercase.

use std::collections::BTreeMap;

use strsim::levenshtein;

use super::error::TemplateError;

/// Maximum allowed Levenshtein distance as a percentage of the name length for
/// "did you mean" suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

#[derive(Debug, Clone)]
struct Entry {
    /// The key as first spelled, trimmed
    name: String,
    value: String,
}

/// Case-insensitive store of named values for one generation run.
///
/// # Examples
///
/// ```rust
/// use bpl_cli::templating::NamedValues;
///
/// let mut values = NamedValues::new();
/// values.add("Name", "Widget")?;
///
/// assert_eq!(values.get("name"), "widget");
/// assert_eq!(values.get("NAME"), "WIDGET");
/// assert_eq!(values.get("Name"), "Widget");
/// assert!(values.add("NAME", "Other").is_err());
/// # Ok::<(), bpl_cli::templating::TemplateError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NamedValues {
    entries: BTreeMap<String, Entry>,
}

impl NamedValues {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Returns true if `name` (trimmed, any case) is defined.
    pub fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::key(name))
    }

    /// Adds a named value. Both name and value are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::DuplicateKey`] if the name is already defined
    /// in any case.
    pub fn add(&mut self, name: &str, value: &str) -> Result<(), TemplateError> {
        let key = Self::key(name);
        if self.entries.contains_key(&key) {
            return Err(TemplateError::DuplicateKey {
                key: name.trim().to_string(),
            });
        }
        self.entries.insert(
            key,
            Entry {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            },
        );
        Ok(())
    }

    /// Returns the value for `name` with the case rules applied, or an empty
    /// string if it is not defined.
    pub fn get(&self, name: &str) -> String {
        let name = name.trim();
        let Some(entry) = self.entries.get(&Self::key(name)) else {
            return String::new();
        };
        if is_lowercase(name) {
            entry.value.to_lowercase()
        } else if is_uppercase(name) {
            entry.value.to_uppercase()
        } else {
            entry.value.clone()
        }
    }

    /// Names as originally spelled, in case-insensitive sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to three defined names close to `target`, closest first.
    pub fn similar_names(&self, target: &str) -> Vec<String> {
        let target = Self::key(target);
        let mut scored: Vec<_> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.name.clone(), levenshtein(&target, key)))
            .collect();

        scored.sort_by_key(|(_, distance)| *distance);

        scored
            .into_iter()
            .filter(|(_, distance)| *distance <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(name, _)| name)
            .collect()
    }
}

fn is_lowercase(name: &str) -> bool {
    name.chars().all(|c| !c.is_uppercase())
}

fn is_uppercase(name: &str) -> bool {
    name.chars().all(|c| !c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> NamedValues {
        let mut values = NamedValues::new();
        for (name, value) in pairs {
            values.add(name, value).unwrap();
        }
        values
    }

    #[test]
    fn test_case_rules_follow_template_spelling() {
        let values = store(&[("Name", "Widget Factory")]);

        assert_eq!(values.get("name"), "widget factory");
        assert_eq!(values.get("NAME"), "WIDGET FACTORY");
        assert_eq!(values.get("Name"), "Widget Factory");
        assert_eq!(values.get("nAmE"), "Widget Factory");
    }

    #[test]
    fn test_names_without_letters_count_as_lowercase() {
        let values = store(&[("123", "MixedValue")]);
        assert_eq!(values.get("123"), "mixedvalue");

        let values = store(&[("_", "MixedValue")]);
        assert_eq!(values.get("_"), "mixedvalue");
    }

    #[test]
    fn test_names_and_values_are_trimmed() {
        let values = store(&[("  spaced  ", "  value  ")]);

        assert!(values.exists("spaced"));
        assert!(values.exists(" SPACED "));
        assert_eq!(values.get(" Spaced "), "value");
    }

    #[test]
    fn test_duplicate_key_rejected_case_insensitively() {
        let mut values = store(&[("Name", "Widget")]);

        let err = values.add("name", "Gadget").unwrap_err();
        assert_eq!(
            err,
            TemplateError::DuplicateKey {
                key: "name".to_string()
            }
        );
        assert_eq!(values.get("Name"), "Widget");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_missing_name_returns_empty_string() {
        let values = NamedValues::new();
        assert!(!values.exists("missing"));
        assert_eq!(values.get("missing"), "");
        assert!(values.is_empty());
    }

    #[test]
    fn test_section_qualified_names() {
        let values = store(&[("project.Name", "Widget")]);
        assert!(values.exists("Project.name"));
        assert_eq!(values.get("PROJECT.NAME"), "WIDGET");
    }

    #[test]
    fn test_names_keep_original_spelling() {
        let values = store(&[("beta", "2"), ("Alpha", "1")]);
        let names: Vec<_> = values.names().collect();
        assert_eq!(names, vec!["Alpha", "beta"]);
    }

    #[test]
    fn test_similar_names() {
        let values = store(&[("project_name", "x"), ("author", "y")]);
        assert_eq!(values.similar_names("projct_name"), vec!["project_name".to_string()]);
        assert!(values.similar_names("zzz").is_empty());
    }
}
