//! Command-line interface for bpl.
//!
//! # Commands
//!
//! - `generate`: instantiate a template into a target directory
//! - `generate-config`: write a blank configuration listing every name a
//!   template needs
//! - `describe`: print what every entry of a template needs
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: errors only
//!
//! `RUST_LOG` overrides both.
//!
//! # Examples
//!
//! ```bash
//! # Write a blank configuration and fill it in
//! bpl generate-config templates/console_app values.ini
//!
//! # Generate a project from it, failing on anything left undefined
//! bpl generate templates/console_app out/widget --config values.ini --strict
//!
//! # Or give the values inline
//! bpl generate templates/console_app out/widget --values "project=Widget,author.name=Jane"
//! ```

mod common;
mod describe;
mod generate;
mod generate_config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Process-wide settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl CliConfig {
    /// Installs the tracing subscriber. `RUST_LOG` wins over the flags.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Generate projects from template directories.
#[derive(Parser)]
#[command(
    name = "bpl",
    about = "Generate projects from template directories",
    version,
    long_about = "bpl instantiates a project from a template directory. Placeholders in file \
                  names (__name__) and file contents ({{name}}) are replaced with named values \
                  from a configuration file or the command line."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a project from a template
    Generate(generate::GenerateCommand),

    /// Write a blank configuration file for a template
    GenerateConfig(generate_config::GenerateConfigCommand),

    /// Describe the placeholders a template uses
    Describe(describe::DescribeCommand),
}

impl Cli {
    /// Runs the selected command after setting up logging.
    pub async fn execute(self) -> Result<()> {
        self.build_config().init_logging();
        self.run().await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };
        CliConfig {
            log_level: log_level.to_string(),
        }
    }

    /// Runs the selected command without touching logging.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute().await,
            Commands::GenerateConfig(cmd) => cmd.execute().await,
            Commands::Describe(cmd) => cmd.execute().await,
        }
    }
}
