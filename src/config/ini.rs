//! INI configuration files.
//!
//! Every line is trimmed and is then either empty, a `;` comment, a
//! `[section]` header or a `key = value` pair split at the first `=`.

use super::{EXTENSIONS_TO_IGNORE, FILES_TO_IGNORE, TemplateConfig, split_list};
use crate::core::BplError;

/// Parses INI text. `file` names the source in error messages.
pub fn parse_ini(content: &str, file: &str) -> Result<TemplateConfig, BplError> {
    let mut config = TemplateConfig::new();
    let mut section = String::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(parse_error(file, line_number, "missing ']' in section header"));
            };
            section = name.trim().to_string();
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(parse_error(file, line_number, "missing '=' in key = value line"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(parse_error(file, line_number, "empty key"));
        }

        if section.is_empty() && key == EXTENSIONS_TO_IGNORE {
            config.extensions_to_ignore.extend(split_list(value));
        } else if section.is_empty() && key == FILES_TO_IGNORE {
            config.files_to_ignore.extend(split_list(value));
        } else if section.is_empty() {
            config.values.push((key.to_string(), value.trim().to_string()));
        } else {
            config.values.push((format!("{section}.{key}"), value.trim().to_string()));
        }
    }

    Ok(config)
}

fn parse_error(file: &str, line: usize, reason: &str) -> BplError {
    BplError::ConfigParseError {
        file: file.to_string(),
        reason: format!("line {line}: {reason}"),
    }
}
