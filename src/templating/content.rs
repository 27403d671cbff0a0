//! Placeholder substitution in file contents.
//!
//! Contents use `{{expr}}`. A block wrapped in four braces,
//! `{{{{literal}}}}`, is emitted with two braces stripped from each side and
//! is never evaluated, so `{{{{name}}}}` produces `{{name}}`.

use super::TemplateContext;
use super::cursor::Cursor;
use super::error::TemplateError;
use super::evaluator::{Outcome, evaluate, miss_error, tolerates_extra_delimiter};

pub const CONTENT_OPEN: &str = "{{";
pub const CONTENT_CLOSE: &str = "}}";
pub const ESCAPE_OPEN: &str = "{{{{";
pub const ESCAPE_CLOSE: &str = "}}}}";

/// Replaces every `{{expr}}` in `text` and unwraps `{{{{...}}}}` escapes.
///
/// # Errors
///
/// In strict mode, an unresolved name, an unterminated `{{` or an
/// unterminated escape is an error. An unresolved placeholder is tolerated
/// when exactly one extra `{` follows the opening delimiter. Function call
/// errors are raised in either mode.
pub fn process_content(
    text: &str,
    context: &TemplateContext,
    strict: bool,
) -> Result<String, TemplateError> {
    let mut cursor = Cursor::new(text);
    let mut output = String::with_capacity(text.len());

    while let Some(c) = cursor.peek() {
        if cursor.starts_with(ESCAPE_OPEN) {
            let open = cursor.pos();
            cursor.advance(ESCAPE_OPEN.len());
            match cursor.rest().find(ESCAPE_CLOSE) {
                Some(len) => {
                    output.push_str(CONTENT_OPEN);
                    output.push_str(&cursor.rest()[..len]);
                    output.push_str(CONTENT_CLOSE);
                    cursor.advance(len + ESCAPE_CLOSE.len());
                }
                None if strict => {
                    return Err(TemplateError::UnterminatedReplacement {
                        delimiter: ESCAPE_OPEN.to_string(),
                        offset: open,
                    });
                }
                None => {
                    output.push_str(&text[open..]);
                    break;
                }
            }
            continue;
        }

        if !cursor.starts_with(CONTENT_OPEN) {
            output.push(c);
            cursor.bump();
            continue;
        }

        let open = cursor.pos();
        let mut inner = cursor;
        inner.advance(CONTENT_OPEN.len());

        match evaluate(&mut inner, CONTENT_CLOSE, context)? {
            Outcome::Matched(value) => {
                output.push_str(&value);
                cursor = inner;
            }
            Outcome::Unmatched(miss) => {
                if strict && !tolerates_extra_delimiter(&inner, '{') {
                    return Err(miss_error(miss, CONTENT_OPEN, open, context));
                }
                output.push('{');
                cursor.bump();
            }
        }
    }

    Ok(output)
}
