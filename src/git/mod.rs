//! Git operations wrapper
//!
//! bpl shells out to the system `git` binary rather than embedding a Git
//! library, so clones work with whatever authentication the user's git is
//! configured for. The only operation a template can trigger is a shallow
//! clone, through a `__GITCLONE__` special file.

pub mod command_builder;

use anyhow::Result;
use std::path::Path;

pub use command_builder::{GitCommand, GitCommandOutput};

use crate::core::BplError;
use crate::utils::platform::{command_exists, get_git_command};

/// Clones the tip of `url` into `target_dir` with `--depth=1`.
///
/// `target_dir` must not exist or be empty, as git requires.
///
/// # Errors
///
/// [`BplError::GitNotFound`] when git is not on `PATH`, and
/// [`BplError::GitCloneFailed`] when git reports a failure.
pub async fn shallow_clone(url: &str, target_dir: &Path) -> Result<()> {
    if !command_exists(get_git_command()) {
        return Err(BplError::GitNotFound.into());
    }

    GitCommand::shallow_clone(url, target_dir)
        .with_context(format!("cloning {url}"))
        .execute_success()
        .await
}
