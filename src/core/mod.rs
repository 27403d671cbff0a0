//! Core error types for bpl
//!
//! ## `error` - Run-level errors
//!
//! - [`BplError`] - Enumerated error types covering every failure of a run
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! ## `file_error` - File system errors
//!
//! - [`FileOperationError`] - An I/O error with the operation, path and purpose
//! - [`FileResultExt`] - Attaches that context to an `io::Result`

pub mod error;
pub mod file_error;

pub use error::{BplError, ErrorContext, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
