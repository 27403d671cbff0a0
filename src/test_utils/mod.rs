//! Test utilities for bpl
//!
//! Helpers for tests that need logging or a template tree on disk.
//!
//! # Example
//!
//! ```rust,no_run
//! use bpl_cli::test_utils::TemplateTree;
//!
//! let tree = TemplateTree::new()
//!     .file("__project__/README.md", "# {{Project}}\n")
//!     .dir("__project__/assets");
//! assert!(tree.path().join("__project__/README.md").is_file());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `Some(level)` that level is used,
/// otherwise `RUST_LOG` is honored when set and nothing is logged when it is
/// not.
///
/// ```bash
/// RUST_LOG=generate=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A template directory in a temporary location, built with a fluent API.
///
/// Setup failures panic, since there is nothing a test can do about them.
pub struct TemplateTree {
    temp_dir: TempDir,
}

impl TemplateTree {
    pub fn new() -> Self {
        let temp_dir =
            TempDir::new().unwrap_or_else(|e| panic!("Failed to create temp directory: {e}"));
        Self {
            temp_dir,
        }
    }

    /// Root of the template.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the template.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Adds a text file, creating parent directories.
    pub fn file(self, relative: &str, content: &str) -> Self {
        self.bytes(relative, content.as_bytes())
    }

    /// Adds a file with arbitrary bytes, creating parent directories.
    pub fn bytes(self, relative: &str, content: &[u8]) -> Self {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create {}: {e}", parent.display()));
        }
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Failed to write {}: {e}", path.display()));
        self
    }

    /// Adds an empty directory.
    pub fn dir(self, relative: &str) -> Self {
        let path = self.join(relative);
        std::fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("Failed to create {}: {e}", path.display()));
        self
    }
}

impl Default for TemplateTree {
    fn default() -> Self {
        Self::new()
    }
}
