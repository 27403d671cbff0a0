//! Inline values given as `name=value,name=value`.
//!
//! Quotes around the whole list are stripped, so both `--values a=1,b=2` and
//! `--values "a=1,b=2"` (as some shells pass it through) work. Values cannot
//! contain `,` or `=`.

use crate::core::BplError;

const SOURCE: &str = "--values";

/// Parses an inline value list. A trailing name without `=` gets an empty
/// value.
pub fn parse_inline_values(text: &str) -> Result<Vec<(String, String)>, BplError> {
    let text = text.trim().trim_matches('"');
    let mut values = Vec::new();
    if text.trim().is_empty() {
        return Ok(values);
    }

    let mut name = String::new();
    let mut value = String::new();
    let mut parsing_name = true;

    for (offset, c) in text.char_indices() {
        match c {
            ',' => {
                if name.trim().is_empty() {
                    return Err(syntax_error(offset, "empty names are not allowed"));
                }
                if parsing_name {
                    return Err(syntax_error(offset, "expected '=' before ','"));
                }
                values.push((name.trim().to_string(), value.trim().to_string()));
                name.clear();
                value.clear();
                parsing_name = true;
            }
            '=' => {
                if !parsing_name {
                    return Err(syntax_error(offset, "unexpected '=' in a value"));
                }
                parsing_name = false;
            }
            _ if parsing_name => name.push(c),
            _ => value.push(c),
        }
    }

    if !name.trim().is_empty() {
        values.push((name.trim().to_string(), value.trim().to_string()));
    } else if !parsing_name || !value.is_empty() {
        return Err(syntax_error(text.len(), "empty names are not allowed"));
    }

    Ok(values)
}

fn syntax_error(offset: usize, reason: &str) -> BplError {
    BplError::ConfigParseError {
        file: SOURCE.to_string(),
        reason: format!("{reason} (at character {offset})"),
    }
}
