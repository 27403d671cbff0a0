//! Write a blank configuration file for a template.
//!
//! The file lists every name the template uses, grouped by section and with
//! empty values, together with the ignore lists given on the command line.
//! Its format follows the extension: JSON for `.json`, INI otherwise.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::IgnoreArgs;
use crate::config::{ConfigFormat, TemplateConfig, blank_config};
use crate::core::BplError;
use crate::generator::TemplateSource;
use crate::utils::fs::atomic_write;

#[derive(Args, Debug)]
pub struct GenerateConfigCommand {
    /// Template directory
    source: PathBuf,

    /// Configuration file to write
    config: PathBuf,

    #[command(flatten)]
    ignore: IgnoreArgs,

    /// Overwrite the configuration file if it exists
    #[arg(short, long)]
    force: bool,
}

impl GenerateConfigCommand {
    pub async fn execute(self) -> Result<()> {
        if self.config.exists() && !self.force {
            return Err(BplError::PathConflict {
                path: self.config.display().to_string(),
            }
            .into());
        }

        let mut lists = TemplateConfig::new();
        lists.add_ignores(
            self.ignore.extensions_to_ignore.as_deref(),
            self.ignore.files_to_ignore.as_deref(),
        );

        let mut source = TemplateSource::new(&self.source, lists.ignore_rules())?;
        let requirements = source.requirements()?;

        let content = blank_config(
            ConfigFormat::from_path(&self.config),
            &requirements,
            &lists.extensions_to_ignore,
            &lists.files_to_ignore,
        )?;
        atomic_write(&self.config, content.as_bytes())?;

        let count: usize = requirements.sections.values().map(|names| names.len()).sum();
        println!(
            "{} Wrote {} with {} names to define",
            "✓".green(),
            self.config.display(),
            count
        );
        Ok(())
    }
}
