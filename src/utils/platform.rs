//! Platform-specific helpers.

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Gets the platform-appropriate Git command name.
///
/// Returns `git.exe` on Windows and `git` elsewhere.
#[must_use]
pub const fn get_git_command() -> &'static str {
    if is_windows() {
        "git.exe"
    } else {
        "git"
    }
}

/// Checks whether `cmd` can be found in `PATH`.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_command_matches_platform() {
        if cfg!(windows) {
            assert_eq!(get_git_command(), "git.exe");
        } else {
            assert_eq!(get_git_command(), "git");
        }
    }

    #[test]
    fn test_command_exists_rejects_nonsense() {
        assert!(!command_exists("bpl-definitely-not-a-real-command-8d1f"));
    }
}
