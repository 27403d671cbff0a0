//! Describe the placeholders a template uses.
//!
//! Prints every entry of the template with the names and functions it uses,
//! followed by a summary of special files, functions and the names to be
//! defined, grouped by section. A configuration file only contributes its
//! ignore lists.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{IgnoreArgs, ValueArgs, load_config};
use crate::generator::TemplateSource;

#[derive(Args, Debug)]
pub struct DescribeCommand {
    /// Template directory
    source: PathBuf,

    /// Configuration file whose ignore lists apply
    #[arg(short, long, env = "BPL_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    ignore: IgnoreArgs,
}

impl DescribeCommand {
    pub async fn execute(self) -> Result<()> {
        let values = ValueArgs {
            config: self.config,
            values: None,
        };
        let config = load_config(&values, &self.ignore)?;

        let mut source = TemplateSource::new(&self.source, config.ignore_rules())?;
        let description = source.describe()?;
        print!("{description}");
        Ok(())
    }
}
