//! Git command builder
//!
//! A fluent API for building and executing Git commands with consistent
//! logging, timeouts and error mapping.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::BplError;
use crate::utils::platform::get_git_command;

/// Default timeout for a git invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Builder for constructing and executing Git commands.
///
/// # Examples
///
/// ```rust,no_run
/// use bpl_cli::git::GitCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let output = GitCommand::new()
///     .args(["--version"])
///     .with_context("Checking git")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
///
/// New commands have a 5 minute timeout, capture their output and run in the
/// current process directory.
#[derive(Debug)]
pub struct GitCommand {
    /// Command arguments to pass to Git
    args: Vec<String>,

    /// Working directory, passed to git with `-C`
    current_dir: Option<PathBuf>,

    /// Maximum duration to wait for command completion
    timeout_duration: Duration,

    /// Optional context string for log messages
    context: Option<String>,

    /// For clone commands, the URL for error messages
    clone_url: Option<String>,
}

impl Default for GitCommand {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            current_dir: None,
            timeout_duration: DEFAULT_TIMEOUT,
            context: None,
            clone_url: None,
        }
    }
}

impl GitCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs git as if started in `dir`.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds a label to the log messages of this command.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// A shallow clone of `url` into `target`: `git clone --depth=1 <url> <target>`.
    pub fn shallow_clone(url: &str, target: impl AsRef<Path>) -> Self {
        let mut cmd = Self::new().args([
            "clone".to_string(),
            "--depth=1".to_string(),
            url.to_string(),
            target.as_ref().display().to_string(),
        ]);
        cmd.clone_url = Some(url.to_string());
        cmd
    }

    fn full_args(&self) -> Vec<String> {
        let mut full_args = Vec::new();
        if let Some(dir) = &self.current_dir {
            full_args.push("-C".to_string());
            full_args.push(dir.display().to_string());
        }
        full_args.extend(self.args.iter().cloned());
        full_args
    }

    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "unknown".to_string())
    }

    /// Execute the command and return its output.
    ///
    /// # Errors
    ///
    /// - [`BplError::GitNotFound`] if the git executable cannot be started
    /// - [`BplError::GitCommandError`] on timeout or a non-zero exit
    /// - [`BplError::GitCloneFailed`] when a clone exits non-zero
    pub async fn execute(self) -> Result<GitCommandOutput> {
        let start = std::time::Instant::now();
        let git_command = get_git_command();
        let full_args = self.full_args();

        let mut cmd = Command::new(git_command);
        cmd.args(&full_args).stdout(Stdio::piped()).stderr(Stdio::piped()).kill_on_drop(true);

        match &self.context {
            Some(ctx) => tracing::debug!(
                target: "git",
                "({}) Executing command: {} {}",
                ctx,
                git_command,
                full_args.join(" ")
            ),
            None => tracing::debug!(
                target: "git",
                "Executing command: {} {}",
                git_command,
                full_args.join(" ")
            ),
        }

        let duration = self.timeout_duration;
        let Ok(result) = timeout(duration, cmd.output()).await else {
            tracing::warn!(
                target: "git",
                "Command timed out after {} seconds: git {}",
                duration.as_secs(),
                full_args.join(" ")
            );
            return Err(BplError::GitCommandError {
                operation: self.operation(),
                stderr: format!(
                    "Git command timed out after {} seconds. Try running the command manually: git {}",
                    duration.as_secs(),
                    full_args.join(" ")
                ),
            }
            .into());
        };

        let output = match result {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BplError::GitNotFound.into());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to execute git {}", full_args.join(" ")));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "git",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "git", "Error: {}", stderr.trim());
            }

            let operation = self.operation();
            let error = match self.clone_url {
                Some(url) => BplError::GitCloneFailed {
                    url,
                    reason: stderr.trim().to_string(),
                },
                None => BplError::GitCommandError {
                    operation,
                    stderr: if stderr.is_empty() {
                        stdout
                    } else {
                        stderr
                    },
                },
            };
            return Err(error.into());
        }

        if !stdout.is_empty() {
            tracing::debug!(target: "git", "{}", stdout.trim());
        }
        if !stderr.is_empty() {
            tracing::debug!(target: "git", "{}", stderr.trim());
        }
        tracing::debug!(
            target: "git",
            "git {} took {}ms",
            self.operation(),
            start.elapsed().as_millis()
        );

        Ok(GitCommandOutput {
            stdout,
            stderr,
        })
    }

    /// Execute the command and check for success
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Output from a Git command
#[derive(Debug, Clone)]
pub struct GitCommandOutput {
    /// Standard output from the Git command
    pub stdout: String,
    /// Standard error output from the Git command
    pub stderr: String,
}
