//! JSON configuration files.

use serde::{Deserialize, Serialize};

use super::{TemplateConfig, split_list};
use crate::core::BplError;

/// One `{ "name": ..., "value": ... }` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonNamedValue {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// One entry of the `sections` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSection {
    /// Empty for unscoped values
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub named_values: Vec<JsonNamedValue>,
}

/// The whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions_to_ignore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_to_ignore: Option<String>,
    #[serde(default)]
    pub named_values: Vec<JsonNamedValue>,
    #[serde(default)]
    pub sections: Vec<JsonSection>,
}

impl From<JsonConfig> for TemplateConfig {
    fn from(document: JsonConfig) -> Self {
        let mut config = TemplateConfig::new();
        if let Some(extensions) = &document.extensions_to_ignore {
            config.extensions_to_ignore = split_list(extensions);
        }
        if let Some(files) = &document.files_to_ignore {
            config.files_to_ignore = split_list(files);
        }

        config.values.extend(document.named_values.into_iter().map(|nv| (nv.name, nv.value)));
        for section in document.sections {
            let prefix = section.name.trim().to_string();
            config.values.extend(section.named_values.into_iter().map(|nv| {
                if prefix.is_empty() {
                    (nv.name, nv.value)
                } else {
                    (format!("{prefix}.{}", nv.name.trim()), nv.value)
                }
            }));
        }
        config
    }
}

/// Parses JSON text. `file` names the source in error messages.
pub fn parse_json(content: &str, file: &str) -> Result<TemplateConfig, BplError> {
    let document: JsonConfig =
        serde_json::from_str(content).map_err(|e| BplError::ConfigParseError {
            file: file.to_string(),
            reason: format!("line {}, column {}: {e}", e.line(), e.column()),
        })?;
    Ok(document.into())
}
