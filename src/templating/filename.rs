//! Placeholder substitution in file and directory names.
//!
//! Names use `__expr__`. There is no escape: text that does not form a
//! resolvable placeholder is kept as written, one `_` at a time.

use super::TemplateContext;
use super::cursor::Cursor;
use super::error::TemplateError;
use super::evaluator::{Outcome, evaluate, miss_error, tolerates_extra_delimiter};

/// Opening and closing delimiter of a filename placeholder.
pub const FILENAME_DELIMITER: &str = "__";

/// Replaces every `__expr__` in `text`.
///
/// In strict mode an unresolved placeholder is an error unless exactly one
/// extra `_` follows the opening delimiter (`___name__`), which keeps a
/// leading underscore in front of a substituted name.
///
/// # Errors
///
/// Returns [`TemplateError::UnresolvedName`] or
/// [`TemplateError::UnterminatedReplacement`] in strict mode, and any
/// function call error in either mode.
pub fn process_filename(
    text: &str,
    context: &TemplateContext,
    strict: bool,
) -> Result<String, TemplateError> {
    let mut cursor = Cursor::new(text);
    let mut output = String::with_capacity(text.len());

    while let Some(c) = cursor.peek() {
        if !cursor.starts_with(FILENAME_DELIMITER) {
            output.push(c);
            cursor.bump();
            continue;
        }

        let open = cursor.pos();
        let mut inner = cursor;
        inner.advance(FILENAME_DELIMITER.len());

        match evaluate(&mut inner, FILENAME_DELIMITER, context)? {
            Outcome::Matched(value) => {
                output.push_str(&value);
                cursor = inner;
            }
            Outcome::Unmatched(miss) => {
                if strict && !tolerates_extra_delimiter(&inner, '_') {
                    return Err(miss_error(miss, FILENAME_DELIMITER, open, context));
                }
                output.push('_');
                cursor.bump();
            }
        }
    }

    Ok(output)
}
