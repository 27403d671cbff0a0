//! Error handling for bpl
//!
//! This module provides the error type for generation runs and user-friendly
//! error reporting for the CLI. The error system is designed around two core
//! principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`BplError`] - Enumerated error types for every failure of a run
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Errors raised while processing placeholder text are
//! [`TemplateError`](crate::templating::TemplateError)s and convert into
//! [`BplError::Template`].
//!
//! # Error Categories
//!
//! - **Template tree**: [`BplError::SourceMissing`], [`BplError::TargetInsideSource`],
//!   [`BplError::PathConflict`], [`BplError::GenerationFailed`]
//! - **Configuration**: [`BplError::ConfigNotFound`], [`BplError::ConfigParseError`]
//! - **Special files and git**: [`BplError::SpecialFileInvalid`], [`BplError::GitNotFound`],
//!   [`BplError::GitCloneFailed`], [`BplError::GitCommandError`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use bpl_cli::core::{BplError, ErrorContext, user_friendly_error};
//!
//! let error = BplError::SourceMissing {
//!     path: "templates/service".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//!
//! let context = ErrorContext::new(BplError::GitNotFound)
//!     .with_suggestion("Install git")
//!     .with_details("__GITCLONE__ files shell out to git");
//! let message = format!("{}", context);
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::TemplateError;

/// The main error type for bpl operations
#[derive(Error, Debug, Clone)]
pub enum BplError {
    /// A target path already exists and `--force` was not given
    #[error("Target path already exists: {path}")]
    PathConflict {
        /// The existing target path
        path: String,
    },

    /// The template source directory does not exist
    #[error("Template source directory not found: {path}")]
    SourceMissing {
        /// The source path as given
        path: String,
    },

    /// Generating into the template itself would feed output back into the walk
    #[error("Target directory {target_dir} is inside the template directory {source_dir}")]
    TargetInsideSource {
        /// The absolute source directory
        source_dir: String,
        /// The absolute target directory
        target_dir: String,
    },

    /// A configuration file or inline value list could not be parsed
    #[error("Invalid configuration in {file}: {reason}")]
    ConfigParseError {
        /// The configuration file, or `--values` for inline values
        file: String,
        /// What is wrong, including the line where known
        reason: String,
    },

    /// The configuration file given on the command line does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path as given
        path: String,
    },

    /// A special file does not have the content its handler expects
    #[error("Invalid special file {path}: {reason}")]
    SpecialFileInvalid {
        /// The special file in the template
        path: String,
        /// What is wrong with its content
        reason: String,
    },

    /// Git executable not found in PATH
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// Git repository clone failed
    #[error("Failed to clone repository: {url}")]
    GitCloneFailed {
        /// The repository URL that failed to clone
        url: String,
        /// The reason for the clone failure
        reason: String,
    },

    /// Git operation failed during execution
    #[error("Git operation failed: {operation}")]
    GitCommandError {
        /// The git operation that failed
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// Some entries of the template could not be generated
    #[error("Generation finished with failures: {failures} template entries could not be generated")]
    GenerationFailed {
        /// Number of entries that failed
        failures: usize,
    },

    /// Placeholder processing failed
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Displayed with [`display`](Self::display), which colors the error red,
/// the details yellow and the suggestion green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying bpl error
    pub error: BplError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: BplError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`BplError`], [`TemplateError`], file operation errors and
/// [`std::io::Error`]. Anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(bpl_error) = error.downcast_ref::<BplError>() {
        return create_error_context(bpl_error.clone());
    }

    if let Some(template_error) = error.downcast_ref::<TemplateError>() {
        return create_error_context(BplError::Template(template_error.clone()));
    }

    if let Some(file_error) = error.downcast_ref::<super::file_error::FileOperationError>() {
        return ErrorContext::new(BplError::Other {
            message: file_error.user_message(),
        });
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(BplError::Other {
                    message: with_chain(&error),
                })
                .with_suggestion("Check the permissions of the template and target directories")
                .with_details("bpl could not read from the template or write to the target");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(BplError::Other {
                    message: with_chain(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            std::io::ErrorKind::AlreadyExists => {
                return ErrorContext::new(BplError::Other {
                    message: with_chain(&error),
                })
                .with_suggestion("Remove the existing file or use --force to overwrite");
            }
            _ => {}
        }
    }

    ErrorContext::new(BplError::Other {
        message: with_chain(&error),
    })
}

/// The error message followed by its numbered causes.
fn with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Create appropriate [`ErrorContext`] with suggestions for specific errors
fn create_error_context(error: BplError) -> ErrorContext {
    match &error {
        BplError::PathConflict { .. } => ErrorContext::new(error)
            .with_suggestion("Use --force to overwrite existing files, or generate into an empty directory"),

        BplError::SourceMissing { .. } => ErrorContext::new(error)
            .with_suggestion("Check the template path. It must be an existing directory"),

        BplError::TargetInsideSource { .. } => ErrorContext::new(error)
            .with_suggestion("Choose a target directory outside the template directory")
            .with_details("Generated files would otherwise become part of the template being walked"),

        BplError::ConfigParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'bpl generate-config' against the template to get a valid blank configuration")
            .with_details("INI files use 'name = value' lines and [section] headers, ';' starts a comment"),

        BplError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Check the --config path, or create one with 'bpl generate-config'"),

        BplError::SpecialFileInvalid { .. } => ErrorContext::new(error)
            .with_suggestion("A __GITCLONE__ file must contain exactly one line: the URL of the repository to clone"),

        BplError::GitNotFound => ErrorContext::new(error)
            .with_suggestion("Install git from https://git-scm.com/ or your package manager (e.g., 'brew install git', 'apt install git')")
            .with_details("Templates containing __GITCLONE__ files need git available in your PATH"),

        BplError::GitCloneFailed { url, .. } => {
            let suggestion = format!(
                "Verify the repository URL is correct: {url}. Check your internet connection and repository access"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        BplError::GitCommandError { stderr, .. } => {
            let details = stderr.trim().to_string();
            let context = ErrorContext::new(error)
                .with_suggestion("Try running the git command manually for more details");
            if details.is_empty() {
                context
            } else {
                context.with_details(details)
            }
        }

        BplError::GenerationFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the entries reported above and run again with --force")
            .with_details("Every other entry of the template was generated"),

        BplError::Template(TemplateError::UnresolvedName { suggestions, .. }) => {
            let mut context = ErrorContext::new(error.clone())
                .with_details("Strict mode requires every placeholder to be defined");
            if !suggestions.is_empty() {
                context = context.with_suggestion(format!("Did you mean: {}", suggestions.join(", ")));
            }
            context
        }

        BplError::Template(TemplateError::DuplicateKey { .. }) => ErrorContext::new(error)
            .with_suggestion("Define each name once. Names are not case sensitive")
            .with_details("Values from the configuration file and --values are merged into one set"),

        _ => ErrorContext::new(error),
    }
}
