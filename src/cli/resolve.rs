//! Resolve command — prints the fill column for the current repository.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::cli::SourceArgs;
use crate::resolver::{self, Resolution};

/// Output formats for a resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The width alone.
    #[default]
    Width,
    /// The human-readable notice.
    Notice,
    /// JSON object with project and width.
    Json,
    /// YAML mapping with project and width.
    Yaml,
}

/// Resolve command options.
#[derive(Parser)]
pub struct ResolveCommand {
    /// Repository and configuration selection.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Width)]
    pub format: OutputFormat,
}

impl ResolveCommand {
    /// Executes the resolve command.
    ///
    /// Prints nothing when the repository has no origin remote or the
    /// project has no configured width.
    pub fn execute(self) -> Result<()> {
        let mapping = self.source.load_mapping()?;
        let source = self.source.remote_source()?;

        let remote_url = source.origin_url();
        if let Some(resolution) = resolver::apply(remote_url.as_deref(), &mapping) {
            println!("{}", render(&resolution, self.format)?);
        }

        Ok(())
    }
}

/// Renders `resolution` in `format`.
pub fn render(resolution: &Resolution, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Width => Ok(resolution.width.to_string()),
        OutputFormat::Notice => Ok(resolution.notice()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(resolution).context("Failed to serialize resolution")
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(resolution)
            .context("Failed to serialize resolution")?
            .trim_end()
            .to_string()),
    }
}
