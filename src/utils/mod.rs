//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - File system operations with atomic writes
//! - [`platform`] - Platform-specific helpers such as the git executable name
//!
//! # Example
//!
//! ```rust,no_run
//! use bpl_cli::utils::{atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("output/src"))?;
//! atomic_write(Path::new("output/src/main.rs"), b"fn main() {}\n")?;
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, copy_file, ensure_dir, to_forward_slashes};
pub use platform::{command_exists, get_git_command, is_windows};
