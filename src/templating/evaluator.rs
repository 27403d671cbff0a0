//! Recursive-descent evaluation of a single placeholder.
//!
//! [`evaluate`] is called with the cursor positioned just after an opening
//! delimiter and reads up to the matching terminator. A placeholder is either
//! a plain name or a call to a registered function:
//!
//! ```text
//! placeholder := ws* (call | name) terminator
//! call        := function "(" (ws* argument ws* ","?)* ")"
//! argument    := integer | float | string | defined-name
//! ```
//!
//! Text before `(` that does not name a registered function is part of the
//! name, so `{{a(b)}}` looks up the name `a(b)`.

use tracing::trace;

use super::TemplateContext;
use super::cursor::Cursor;
use super::error::TemplateError;
use super::functions::{Argument, FunctionCall, MAX_ARGUMENTS};

/// The result of evaluating one placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The placeholder resolved to this text. The cursor sits after the
    /// terminator.
    Matched(String),
    /// The placeholder did not resolve. The cursor is where it was.
    Unmatched(Miss),
}

/// Why a placeholder did not resolve.
#[derive(Debug, Clone, PartialEq)]
pub enum Miss {
    /// The terminator was found but the trimmed name is not defined.
    Undefined(String),
    /// End of input came before the terminator.
    Unterminated,
}

/// Evaluates the placeholder at the cursor.
///
/// # Errors
///
/// Returns [`TemplateError::MalformedCall`] for a function call that cannot
/// be parsed, or any error raised by the function itself.
pub fn evaluate(
    cursor: &mut Cursor<'_>,
    terminator: &str,
    context: &TemplateContext,
) -> Result<Outcome, TemplateError> {
    let checkpoint = *cursor;
    let mut scan = *cursor;
    scan.skip_whitespace();
    let name_start = scan.pos();

    loop {
        if scan.starts_with(terminator) {
            break;
        }
        match scan.peek() {
            None => return Ok(Outcome::Unmatched(Miss::Unterminated)),
            Some('(') => {
                let candidate = scan.slice_from(name_start).trim();
                if let Some(call) = context.functions().create(candidate) {
                    let value = evaluate_call(&mut scan, call, terminator, context)?;
                    *cursor = scan;
                    return Ok(Outcome::Matched(value));
                }
                scan.bump();
            }
            Some(_) => {
                scan.bump();
            }
        }
    }

    let name = scan.slice_from(name_start).trim();
    if !context.values().exists(name) {
        trace!("undefined placeholder name '{name}' at {}", checkpoint.pos());
        return Ok(Outcome::Unmatched(Miss::Undefined(name.to_string())));
    }

    let value = context.values().get(name);
    scan.advance(terminator.len());
    *cursor = scan;
    Ok(Outcome::Matched(value))
}

/// Parses the argument list at `(` and invokes the function.
fn evaluate_call(
    cursor: &mut Cursor<'_>,
    mut call: FunctionCall,
    terminator: &str,
    context: &TemplateContext,
) -> Result<String, TemplateError> {
    cursor.bump();

    loop {
        cursor.skip_whitespace();
        if cursor.peek() == Some(')') {
            cursor.bump();
            break;
        }
        if cursor.is_eof() || cursor.starts_with(terminator) {
            return Err(malformed(&call, cursor, "missing closing ')'"));
        }
        if call.arguments().len() == MAX_ARGUMENTS {
            return Err(malformed(
                &call,
                cursor,
                &format!("too many arguments (at most {MAX_ARGUMENTS})"),
            ));
        }

        let argument = parse_argument(cursor, &call, terminator, context)?;
        call.push_argument(argument);

        cursor.skip_whitespace();
        if cursor.peek() == Some(',') {
            cursor.bump();
        }
    }

    if !cursor.starts_with(terminator) {
        return Err(malformed(&call, cursor, &format!("expected '{terminator}' after ')'")));
    }
    cursor.advance(terminator.len());

    trace!("calling {} with {:?}", call.name(), call.arguments());
    call.evaluate(context)
}

fn parse_argument(
    cursor: &mut Cursor<'_>,
    call: &FunctionCall,
    terminator: &str,
    context: &TemplateContext,
) -> Result<Argument, TemplateError> {
    if let Some(number) = parse_number(cursor) {
        return Ok(number);
    }
    if cursor.peek() == Some('"') {
        return parse_string(cursor, call);
    }

    let start = cursor.pos();
    while let Some(c) = cursor.peek() {
        if c.is_whitespace() || matches!(c, ',' | '(' | ')' | '"') || cursor.starts_with(terminator) {
            break;
        }
        cursor.bump();
    }
    let name = cursor.slice_from(start);

    if name.is_empty() {
        return Err(malformed(call, cursor, "expected an argument"));
    }
    if !context.values().exists(name) {
        return Err(TemplateError::MalformedCall {
            function: call.name().to_string(),
            offset: start,
            reason: format!("'{name}' is not a number, a string or a defined name"),
        });
    }
    Ok(Argument::Text(context.values().get(name)))
}

/// Reads an integer or floating point literal. Returns `None` with the
/// cursor unchanged unless the literal is followed, after optional
/// whitespace, by `,` or `)`.
fn parse_number(cursor: &mut Cursor<'_>) -> Option<Argument> {
    let mut scan = *cursor;
    let start = scan.pos();

    if matches!(scan.peek(), Some('+' | '-')) {
        scan.bump();
    }
    let integer_digits = eat_digits(&mut scan);
    let mut floating = false;

    let mut fraction_digits = 0;
    if scan.peek() == Some('.') {
        scan.bump();
        fraction_digits = eat_digits(&mut scan);
        floating = true;
    }
    if integer_digits + fraction_digits == 0 {
        return None;
    }

    if matches!(scan.peek(), Some('e' | 'E')) {
        let mut exponent = scan;
        exponent.bump();
        if matches!(exponent.peek(), Some('+' | '-')) {
            exponent.bump();
        }
        if eat_digits(&mut exponent) > 0 {
            scan = exponent;
            floating = true;
        }
    }

    let literal = scan.slice_from(start);

    let mut follow = scan;
    follow.skip_whitespace();
    if !matches!(follow.peek(), Some(',' | ')')) {
        return None;
    }

    let argument = if floating {
        Argument::Floating(literal.parse().ok()?)
    } else {
        match literal.parse::<i64>() {
            Ok(value) => Argument::Integer(value),
            Err(_) => Argument::Floating(literal.parse().ok()?),
        }
    };
    *cursor = scan;
    Some(argument)
}

fn eat_digits(cursor: &mut Cursor<'_>) -> usize {
    let mut count = 0;
    while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
        cursor.bump();
        count += 1;
    }
    count
}

/// Reads a double-quoted string. `\"` stands for a quote; any other
/// backslash is literal.
fn parse_string(cursor: &mut Cursor<'_>, call: &FunctionCall) -> Result<Argument, TemplateError> {
    let open = cursor.pos();
    cursor.bump();
    let mut value = String::new();

    loop {
        match cursor.bump() {
            None => {
                return Err(TemplateError::MalformedCall {
                    function: call.name().to_string(),
                    offset: open,
                    reason: "unterminated string".to_string(),
                });
            }
            Some('"') => break,
            Some('\\') if cursor.peek() == Some('"') => {
                cursor.bump();
                value.push('"');
            }
            Some(c) => value.push(c),
        }
    }

    Ok(Argument::Text(value))
}

fn malformed(call: &FunctionCall, cursor: &Cursor<'_>, reason: &str) -> TemplateError {
    TemplateError::MalformedCall {
        function: call.name().to_string(),
        offset: cursor.pos(),
        reason: reason.to_string(),
    }
}

/// Whether an unmatched placeholder is tolerated in strict mode: exactly one
/// extra delimiter character follows the opening delimiter (`___name__`,
/// `{{{name}}`).
pub(super) fn tolerates_extra_delimiter(after_open: &Cursor<'_>, delimiter: char) -> bool {
    after_open.peek() == Some(delimiter) && after_open.peek_nth(1) != Some(delimiter)
}

/// The strict-mode error for an unmatched placeholder opened at `offset`.
pub(super) fn miss_error(
    miss: Miss,
    delimiter: &str,
    offset: usize,
    context: &TemplateContext,
) -> TemplateError {
    match miss {
        Miss::Undefined(name) => TemplateError::UnresolvedName {
            suggestions: context.values().similar_names(&name),
            name,
            offset,
        },
        Miss::Unterminated => TemplateError::UnterminatedReplacement {
            delimiter: delimiter.to_string(),
            offset,
        },
    }
}
