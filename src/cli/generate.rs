//! Generate a project from a template.
//!
//! # Examples
//!
//! ```bash
//! bpl generate templates/console_app out/widget --config values.ini
//! bpl generate templates/console_app out/widget --values "project=Widget" --strict
//! bpl generate templates/console_app out/widget -c values.json --force \
//!     --extensions-to-ignore png,ico --files-to-ignore binfiles
//! ```
//!
//! Every entry of the template is attempted. If any of them fails, the
//! command reports how many did and exits with a non-zero status.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{IgnoreArgs, ValueArgs, load_config};
use crate::core::BplError;
use crate::generator::{GenerateOptions, Generator};
use crate::templating::TemplateContext;

#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Template directory
    source: PathBuf,

    /// Directory to generate into (must not be inside the template)
    target: PathBuf,

    #[command(flatten)]
    values: ValueArgs,

    #[command(flatten)]
    ignore: IgnoreArgs,

    /// Fail on placeholders that are not defined instead of leaving them in place
    #[arg(short, long)]
    strict: bool,

    /// Overwrite files and directories that already exist in the target
    #[arg(short, long)]
    force: bool,
}

impl GenerateCommand {
    pub async fn execute(self) -> Result<()> {
        let config = load_config(&self.values, &self.ignore)?;
        let context = TemplateContext::new(config.named_values()?);

        let mut generator = Generator::new(
            &self.source,
            &self.target,
            context,
            config.ignore_rules(),
            GenerateOptions {
                strict: self.strict,
                force: self.force,
            },
        )?;
        let report = generator.generate().await?;

        if !report.is_success() {
            eprintln!("{}", "Failed entries:".red().bold());
            for failure in &report.failures {
                eprintln!("  {} {}", failure.path.bold(), failure.message);
            }
            return Err(BplError::GenerationFailed {
                failures: report.failures.len(),
            }
            .into());
        }

        println!("{} Generated {} ({})", "✓".green(), self.target.display(), report);
        Ok(())
    }
}
