//! Blank configuration files.
//!
//! A blank configuration lists every name a template needs with an empty
//! value, plus the ignore lists it was generated with. Sections and names are
//! sorted.

use anyhow::Result;

use super::json::{JsonConfig, JsonNamedValue, JsonSection};
use super::{ConfigFormat, EXTENSIONS_TO_IGNORE, FILES_TO_IGNORE, join_list};
use crate::templating::Requirements;

/// Renders a blank configuration in `format`.
pub fn blank_config(
    format: ConfigFormat,
    requirements: &Requirements,
    extensions_to_ignore: &[String],
    files_to_ignore: &[String],
) -> Result<String> {
    match format {
        ConfigFormat::Ini => Ok(blank_ini(requirements, extensions_to_ignore, files_to_ignore)),
        ConfigFormat::Json => blank_json(requirements, extensions_to_ignore, files_to_ignore),
    }
}

pub fn blank_ini(
    requirements: &Requirements,
    extensions_to_ignore: &[String],
    files_to_ignore: &[String],
) -> String {
    let mut out = String::new();
    push_pair(&mut out, EXTENSIONS_TO_IGNORE, &join_list(extensions_to_ignore));
    push_pair(&mut out, FILES_TO_IGNORE, &join_list(files_to_ignore));

    // The default section sorts first, so its keys land before any header
    for (section, names) in &requirements.sections {
        if !section.is_empty() {
            out.push_str(&format!("\n[{section}]\n"));
        }
        for name in names {
            push_pair(&mut out, name, "");
        }
    }
    out
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    out.push_str(format!("{key} = {value}").trim_end());
    out.push('\n');
}

pub fn blank_json(
    requirements: &Requirements,
    extensions_to_ignore: &[String],
    files_to_ignore: &[String],
) -> Result<String> {
    let blank = |names: &std::collections::BTreeSet<String>| {
        names
            .iter()
            .map(|name| JsonNamedValue {
                name: name.clone(),
                value: String::new(),
            })
            .collect::<Vec<_>>()
    };

    let mut document = JsonConfig {
        extensions_to_ignore: Some(join_list(extensions_to_ignore)),
        files_to_ignore: Some(join_list(files_to_ignore)),
        ..JsonConfig::default()
    };
    for (section, names) in &requirements.sections {
        if section.is_empty() {
            document.named_values = blank(names);
        } else {
            document.sections.push(JsonSection {
                name: section.clone(),
                named_values: blank(names),
            });
        }
    }

    let mut json = serde_json::to_string_pretty(&document)?;
    json.push('\n');
    Ok(json)
}
