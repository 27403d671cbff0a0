//! bpl - boilerplate project generator
//!
//! bpl instantiates a source-code project from a template directory. A
//! template is an ordinary directory tree whose file names and file contents
//! contain placeholders. Given a set of named values, bpl writes a copy of the
//! tree with every placeholder replaced.
//!
//! # Architecture Overview
//!
//! - File names use `__name__` placeholders, file contents use `{{name}}`
//! - Names are not case sensitive. The spelling in the template decides the
//!   case of the substituted value (`name` → lowercase, `NAME` → uppercase,
//!   anything else → as defined)
//! - Values come from an INI or JSON configuration file and the command line
//! - Ignore rules mark files whose content is copied byte for byte
//! - Special files such as `__GITCLONE__` run a handler instead of being copied
//!
//! # Core Modules
//!
//! ## Placeholder language
//! - [`templating`] - values, functions, evaluator, processors and scanner
//! - [`pattern`] - ignore rules for extensions, names and wildcard patterns
//! - [`special`] - special files and their handlers
//!
//! ## Generation
//! - [`generator`] - walks a template and writes or describes it
//! - [`config`] - configuration files, inline values and blank configurations
//! - [`cli`] - the `generate`, `generate-config` and `describe` commands
//!
//! ## Supporting modules
//! - [`core`] - error types and user-facing error formatting
//! - [`git`] - system git wrapper used by `__GITCLONE__`
//! - [`utils`] - atomic writes and platform helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use bpl_cli::config::TemplateConfig;
//! use bpl_cli::generator::{GenerateOptions, Generator};
//! use bpl_cli::templating::TemplateContext;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = TemplateConfig::load(Path::new("values.ini"))?;
//! let mut generator = Generator::new(
//!     "templates/console_app",
//!     "out/widget",
//!     TemplateContext::new(config.named_values()?),
//!     config.ignore_rules(),
//!     GenerateOptions { strict: true, force: false },
//! )?;
//! let report = generator.generate().await?;
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```

// Placeholder language
pub mod pattern;
pub mod special;
pub mod templating;

// Generation
pub mod cli;
pub mod config;
pub mod generator;

// Supporting modules
pub mod core;
pub mod git;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
