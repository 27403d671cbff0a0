//! Arguments and helpers shared by the commands.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::TemplateConfig;

/// Ignore lists given on the command line, added to the configuration's.
#[derive(Args, Debug, Clone, Default)]
pub struct IgnoreArgs {
    /// Comma-separated extensions whose files are copied without processing
    /// their content (e.g. "png,dll")
    #[arg(long, value_name = "CSV")]
    pub extensions_to_ignore: Option<String>,

    /// Comma-separated file names or wildcard patterns whose content is copied
    /// without processing. A matching directory applies to everything below it
    #[arg(long, value_name = "CSV")]
    pub files_to_ignore: Option<String>,
}

/// Where the named values of a run come from.
#[derive(Args, Debug, Clone, Default)]
pub struct ValueArgs {
    /// Configuration file with named values and ignore lists (INI, or JSON
    /// for a .json extension)
    #[arg(short, long, env = "BPL_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Named values as "name=value,name=value"
    #[arg(long, value_name = "PAIRS")]
    pub values: Option<String>,
}

/// Loads the configuration file, if any, and merges the command-line values
/// and ignore lists on top of it.
pub fn load_config(values: &ValueArgs, ignore: &IgnoreArgs) -> Result<TemplateConfig> {
    let mut config = match &values.config {
        Some(path) => TemplateConfig::load(path)?,
        None => TemplateConfig::new(),
    };

    if let Some(inline) = &values.values {
        config.add_inline_values(inline)?;
    }
    config.add_ignores(ignore.extensions_to_ignore.as_deref(), ignore.files_to_ignore.as_deref());
    Ok(config)
}
