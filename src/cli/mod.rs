//! CLI interface for commit-fill.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::{ConfigError, ProjectWidth, ProjectWidths};
use crate::git::{GitRepository, RemoteUrlSource, StaticRemote};

pub mod config;
pub mod fill;
pub mod name;
pub mod resolve;

/// commit-fill: Per-project fill column for commit messages.
#[derive(Parser)]
#[command(name = "commit-fill")]
#[command(about = "Per-project fill column for commit messages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolves the fill column for the current repository.
    Resolve(resolve::ResolveCommand),
    /// Prints the project name derived from a remote URL.
    Name(name::NameCommand),
    /// Reflows a commit message file at the resolved fill column.
    Fill(fill::FillCommand),
    /// Configuration inspection.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Resolve(resolve_cmd) => resolve_cmd.execute(),
            Commands::Name(name_cmd) => name_cmd.execute(),
            Commands::Fill(fill_cmd) => fill_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
        }
    }
}

/// Parses a `--project-width NAME=WIDTH` argument.
pub(crate) fn parse_project_width(s: &str) -> Result<ProjectWidth, ConfigError> {
    ProjectWidth::parse_override(s)
}

/// Options selecting the repository and the project width mapping.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Repository to read the origin remote from (defaults to the current directory).
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub repo: Option<PathBuf>,

    /// Remote URL to use instead of reading it from a repository.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Project widths file (defaults to $COMMIT_FILL_CONFIG or ~/.commit-fill/projects.yaml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project width taking precedence over the configuration file.
    #[arg(long = "project-width", value_name = "NAME=WIDTH", value_parser = parse_project_width)]
    pub project_widths: Vec<ProjectWidth>,
}

impl SourceArgs {
    /// Loads the configured mapping with command-line overrides in front.
    pub fn load_mapping(&self) -> Result<ProjectWidths> {
        let mapping = ProjectWidths::load(self.config.as_deref())?;
        mapping
            .with_overrides(self.project_widths.clone())
            .context("Invalid project width override")
    }

    /// Returns the source of the origin remote URL.
    ///
    /// Outside a git repository the remote is simply absent, unless a
    /// repository path was given explicitly.
    pub fn remote_source(&self) -> Result<Box<dyn RemoteUrlSource>> {
        if let Some(url) = &self.url {
            return Ok(Box::new(StaticRemote::new(url.clone())));
        }

        open_repository(self.repo.as_deref())
    }
}

/// Opens the repository at `path`, or the one containing the current directory.
pub(crate) fn open_repository(path: Option<&std::path::Path>) -> Result<Box<dyn RemoteUrlSource>> {
    match path {
        Some(path) => Ok(Box::new(GitRepository::open_at(path)?)),
        None => match GitRepository::open() {
            Ok(repo) => Ok(Box::new(repo)),
            Err(e) => {
                debug!("No repository in current directory: {e:#}");
                Ok(Box::new(StaticRemote::none()))
            }
        },
    }
}
