//! Placeholder language for template trees.
//!
//! A template is a directory tree whose file names and file contents contain
//! placeholders. This module implements the language itself: evaluation of
//! placeholders against a set of named values, and a non-evaluating scan that
//! lists the names a template needs.
//!
//! # Syntax
//!
//! | Where     | Placeholder | Escape                          |
//! |-----------|-------------|---------------------------------|
//! | Filenames | `__expr__`  | none                            |
//! | Contents  | `{{expr}}`  | `{{{{literal}}}}` → `{{literal}}` |
//!
//! `expr` is either a name or a function call such as `GUID(0)`. Names may be
//! qualified with one section level, `section.name`.
//!
//! # Case rules
//!
//! Names are looked up without regard to case. The spelling used in the
//! template decides the case of the substituted value, see [`NamedValues`].
//!
//! # Strict mode
//!
//! Without strict mode an unresolved placeholder is left in place. With it,
//! the processors return an error, except for a single extra delimiter
//! character after the opening delimiter (`___name__` or `{{{name}}`) which
//! is the conventional way of writing a delimiter character right in front of
//! a placeholder.
//!
//! # Examples
//!
//! ```rust
//! use bpl_cli::templating::{NamedValues, TemplateContext, process_content, process_filename};
//!
//! let mut values = NamedValues::new();
//! values.add("project", "Widget")?;
//! let context = TemplateContext::new(values);
//!
//! assert_eq!(process_filename("src/__project__.rs", &context, true)?, "src/widget.rs");
//! assert_eq!(
//!     process_content("struct {{Project}}; // {{{{project}}}}", &context, true)?,
//!     "struct Widget; // {{project}}"
//! );
//! # Ok::<(), bpl_cli::templating::TemplateError>(())
//! ```

pub mod content;
pub mod cursor;
pub mod error;
pub mod evaluator;
pub mod filename;
pub mod functions;
pub mod scanner;
pub mod values;

use std::cell::RefCell;
use std::collections::HashMap;

pub use content::process_content;
pub use error::{ArgumentKind, TemplateError, locate};
pub use evaluator::{Miss, Outcome};
pub use filename::process_filename;
pub use functions::{Argument, FunctionCall, FunctionRegistry, TemplateFunction};
pub use scanner::{Requirements, ScanOptions, scan_content, scan_filename, scan_filename_with};
pub use values::NamedValues;

/// Everything a generation run evaluates placeholders against.
///
/// One context lives for exactly one run. It owns the named values, the
/// function registry and the memo that makes `GUID(n)` return the same value
/// for every occurrence within the run.
#[derive(Debug)]
pub struct TemplateContext {
    values: NamedValues,
    functions: FunctionRegistry,
    memo: RefCell<HashMap<(String, i64), String>>,
}

impl TemplateContext {
    /// A context with the built-in functions registered.
    pub fn new(values: NamedValues) -> Self {
        Self::with_functions(values, FunctionRegistry::with_builtins())
    }

    pub fn with_functions(values: NamedValues, functions: FunctionRegistry) -> Self {
        Self {
            values,
            functions,
            memo: RefCell::new(HashMap::new()),
        }
    }

    pub fn values(&self) -> &NamedValues {
        &self.values
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Returns the value memoized for `(function, key)`, computing it with
    /// `make` on first use.
    pub fn memoize(&self, function: &str, key: i64, make: impl FnOnce() -> String) -> String {
        self.memo
            .borrow_mut()
            .entry((function.to_lowercase(), key))
            .or_insert_with(make)
            .clone()
    }
}
