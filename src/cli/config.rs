//! Configuration-related CLI commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{config_path, ProjectWidths};

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the effective project widths as YAML.
    Show(ShowCommand),
    /// Shows the configuration file location.
    Path(PathCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Project widths file to show instead of the default one.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Path command options.
#[derive(Parser)]
pub struct PathCommand {}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
            ConfigSubcommands::Path(path_cmd) => path_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }

    /// Renders the effective project widths.
    fn render(&self) -> Result<String> {
        ProjectWidths::load(self.config.as_deref())?.to_yaml()
    }
}

impl PathCommand {
    /// Executes the path command.
    pub fn execute(self) -> Result<()> {
        println!("{}", config_path()?.display());
        Ok(())
    }
}
