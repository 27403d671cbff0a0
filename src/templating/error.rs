//! Template error handling for placeholder processing
//!
//! This module provides the structured error type raised while evaluating or
//! scanning placeholders, together with helpers that turn byte offsets into
//! `line:column` positions for user-facing messages.

use std::fmt;

use thiserror::Error;

/// The variant of a function argument, used in [`TemplateError::TypeMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Integer,
    Floating,
    Text,
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentKind::Integer => write!(f, "integer"),
            ArgumentKind::Floating => write!(f, "floating point number"),
            ArgumentKind::Text => write!(f, "text"),
        }
    }
}

/// Errors raised by the value store, the function registry, the evaluator and
/// the two processors.
///
/// An unknown function name is deliberately absent: text before `(` that does
/// not name a registered function is simply part of a placeholder name.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// A named value was added twice (keys are not case sensitive)
    #[error("Duplicate entry in the named values: '{key}' (keys are not case sensitive)")]
    DuplicateKey {
        /// The key as it was spelled in the second insertion
        key: String,
    },

    /// A function name was registered twice
    #[error("Function '{name}' is already registered")]
    DuplicateFunction {
        /// The function name
        name: String,
    },

    /// An argument was read as the wrong variant
    #[error("Argument is of wrong type, expected {expected} but found {found}")]
    TypeMismatch {
        /// The variant the function asked for
        expected: ArgumentKind,
        /// The variant the argument actually holds
        found: ArgumentKind,
    },

    /// A function received the wrong number of arguments
    #[error("Function {function} takes exactly {expected} argument(s), {found} given")]
    ArityMismatch {
        /// The function name
        function: String,
        /// The number of arguments the function takes
        expected: usize,
        /// The number of arguments in the call
        found: usize,
    },

    /// A function call could not be parsed
    #[error("Malformed call to {function} at character {offset}: {reason}")]
    MalformedCall {
        /// The function name as registered
        function: String,
        /// Byte offset of the problem within the processed text
        offset: usize,
        /// What went wrong
        reason: String,
    },

    /// An opening delimiter never found its closing terminator
    #[error("Non-terminated replacement '{delimiter}' at character {offset}")]
    UnterminatedReplacement {
        /// The opening delimiter (`__`, `{{` or `{{{{`)
        delimiter: String,
        /// Byte offset of the opening delimiter
        offset: usize,
    },

    /// Strict mode only: a placeholder name is not defined
    #[error("Unhandled replacement '{name}' at character {offset}")]
    UnresolvedName {
        /// The trimmed placeholder name
        name: String,
        /// Byte offset of the opening delimiter
        offset: usize,
        /// Defined names close to `name`
        suggestions: Vec<String>,
    },
}

impl TemplateError {
    /// Byte offset of the error within the processed text, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            TemplateError::MalformedCall {
                offset,
                ..
            }
            | TemplateError::UnterminatedReplacement {
                offset,
                ..
            }
            | TemplateError::UnresolvedName {
                offset,
                ..
            } => Some(*offset),
            _ => None,
        }
    }

    /// Generate a message with the position resolved against `text` and any
    /// suggestions appended.
    pub fn format_with_context(&self, text: &str) -> String {
        let mut msg = match self.offset() {
            Some(offset) => {
                let (line, column) = locate(text, offset);
                format!("{self} (line {line}, column {column})")
            }
            None => self.to_string(),
        };

        if let TemplateError::UnresolvedName {
            suggestions,
            ..
        } = self
        {
            if !suggestions.is_empty() {
                msg.push_str("\nDid you mean one of these?");
                for suggestion in suggestions {
                    msg.push_str(&format!("\n  - {suggestion}"));
                }
            }
        }

        msg
    }
}

/// Converts a byte offset into a 1-based `(line, column)` pair.
///
/// Offsets past the end of `text` resolve to the position just after the last
/// character. Columns count characters, not bytes.
pub fn locate(text: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = &text[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_line() {
        assert_eq!(locate("hello {{x}}", 6), (1, 7));
        assert_eq!(locate("", 0), (1, 1));
    }

    #[test]
    fn test_locate_multiline() {
        let text = "line one\nline two {{x}}\n";
        assert_eq!(locate(text, 18), (2, 10));
        assert_eq!(locate(text, 9), (2, 1));
    }

    #[test]
    fn test_locate_clamps_past_end() {
        assert_eq!(locate("ab", 100), (1, 3));
    }

    #[test]
    fn test_offset_only_for_positional_errors() {
        let positional = TemplateError::UnterminatedReplacement {
            delimiter: "{{".to_string(),
            offset: 4,
        };
        assert_eq!(positional.offset(), Some(4));

        let keyed = TemplateError::DuplicateKey {
            key: "name".to_string(),
        };
        assert_eq!(keyed.offset(), None);
    }

    #[test]
    fn test_format_with_context_includes_suggestions() {
        let error = TemplateError::UnresolvedName {
            name: "nmae".to_string(),
            offset: 9,
            suggestions: vec!["name".to_string()],
        };
        let message = error.format_with_context("a\nprefix {{nmae}}");
        assert!(message.contains("line 2, column 8"));
        assert!(message.contains("Did you mean"));
        assert!(message.contains("  - name"));
    }
}
