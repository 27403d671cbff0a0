//! Functions callable from placeholders.
//!
//! A function call looks like `name(arg0, arg1, ...)`. The name is not case
//! sensitive and at most [`MAX_ARGUMENTS`] arguments are accepted. Each
//! argument is an integer, a floating point number, a quoted string, or a
//! defined name which is replaced by its value before the call.
//!
//! To add a function, implement [`TemplateFunction`] and register a
//! constructor with [`FunctionRegistry::register`]. Built-ins are registered by
//! [`FunctionRegistry::with_builtins`].
//!
//! # Built-in functions
//!
//! - `GUID(int)` returns a GUID identified by the integer. `GUID(0)` is the
//!   same string every time it appears during one run, and so is `GUID(1)`
//!   and so on. Visual Studio project files use GUIDs as handles, which is
//!   why they have to repeat. They are not stable between runs.

use std::collections::HashMap;
use std::fmt;

use super::TemplateContext;
use super::error::{ArgumentKind, TemplateError};

/// Maximum number of arguments in a single function call.
pub const MAX_ARGUMENTS: usize = 5;

/// A parsed function argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Integer(i64),
    Floating(f64),
    Text(String),
}

impl Argument {
    pub fn kind(&self) -> ArgumentKind {
        match self {
            Argument::Integer(_) => ArgumentKind::Integer,
            Argument::Floating(_) => ArgumentKind::Floating,
            Argument::Text(_) => ArgumentKind::Text,
        }
    }

    pub fn integer(&self) -> Result<i64, TemplateError> {
        match self {
            Argument::Integer(i) => Ok(*i),
            other => Err(self.mismatch(ArgumentKind::Integer, other)),
        }
    }

    pub fn floating(&self) -> Result<f64, TemplateError> {
        match self {
            Argument::Floating(f) => Ok(*f),
            other => Err(self.mismatch(ArgumentKind::Floating, other)),
        }
    }

    pub fn text(&self) -> Result<&str, TemplateError> {
        match self {
            Argument::Text(s) => Ok(s),
            other => Err(self.mismatch(ArgumentKind::Text, other)),
        }
    }

    fn mismatch(&self, expected: ArgumentKind, found: &Argument) -> TemplateError {
        TemplateError::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Integer(i) => write!(f, "{i}"),
            Argument::Floating(x) => write!(f, "{x}"),
            Argument::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// A function that can be invoked from a placeholder.
pub trait TemplateFunction {
    /// The canonical name, used in messages.
    fn name(&self) -> &str;

    /// Evaluates the function. Functions are evaluated once, while parsing.
    fn evaluate(
        &self,
        arguments: &[Argument],
        context: &TemplateContext,
    ) -> Result<String, TemplateError>;
}

/// A function instance together with the arguments parsed for it.
pub struct FunctionCall {
    function: Box<dyn TemplateFunction>,
    arguments: Vec<Argument>,
}

impl FunctionCall {
    pub fn new(function: Box<dyn TemplateFunction>) -> Self {
        Self {
            function,
            arguments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.function.name()
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn push_argument(&mut self, argument: Argument) {
        self.arguments.push(argument);
    }

    pub fn evaluate(&self, context: &TemplateContext) -> Result<String, TemplateError> {
        self.function.evaluate(&self.arguments, context)
    }
}

impl fmt::Debug for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionCall")
            .field("name", &self.name())
            .field("arguments", &self.arguments)
            .finish()
    }
}

type Constructor = Box<dyn Fn() -> Box<dyn TemplateFunction>>;

/// Case-insensitive registry of function constructors.
#[derive(Default)]
pub struct FunctionRegistry {
    constructors: HashMap<String, Constructor>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.constructors.insert(Guid::NAME.to_lowercase(), Box::new(|| Box::new(Guid)));
        registry
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Registers a constructor under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::DuplicateFunction`] if the name is taken.
    pub fn register<F>(&mut self, name: &str, constructor: F) -> Result<(), TemplateError>
    where
        F: Fn() -> Box<dyn TemplateFunction> + 'static,
    {
        let key = Self::key(name);
        if self.constructors.contains_key(&key) {
            return Err(TemplateError::DuplicateFunction {
                name: name.trim().to_string(),
            });
        }
        self.constructors.insert(key, Box::new(constructor));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&Self::key(name))
    }

    /// Constructs a fresh instance of the function called `name`.
    pub fn create(&self, name: &str) -> Option<FunctionCall> {
        self.constructors.get(&Self::key(name)).map(|constructor| FunctionCall::new(constructor()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.constructors.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry").field("names", &self.names()).finish()
    }
}

/// `GUID(int)`, see the module documentation.
#[derive(Debug, Clone, Copy)]
pub struct Guid;

impl Guid {
    pub const NAME: &'static str = "GUID";
}

impl TemplateFunction for Guid {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(
        &self,
        arguments: &[Argument],
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        let [index] = arguments else {
            return Err(TemplateError::ArityMismatch {
                function: Self::NAME.to_string(),
                expected: 1,
                found: arguments.len(),
            });
        };
        let index = index.integer()?;
        Ok(context.memoize(Self::NAME, index, simple_uuid))
    }
}

/// Random, uppercase, hyphenated GUID.
fn simple_uuid() -> String {
    uuid::Uuid::new_v4().hyphenated().to_string().to_uppercase()
}
