//! Name command — prints the project name derived from a remote URL.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::open_repository;
use crate::resolver::extract_project_name;

/// Name command options.
#[derive(Parser)]
pub struct NameCommand {
    /// Remote URL (defaults to the origin remote of the repository).
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Repository to read the origin remote from.
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub repo: Option<PathBuf>,
}

impl NameCommand {
    /// Executes the name command.
    pub fn execute(self) -> Result<()> {
        if let Some(name) = self.project_name()? {
            println!("{name}");
        }

        Ok(())
    }

    /// Returns the project name to print, if any.
    fn project_name(&self) -> Result<Option<String>> {
        let remote_url = match &self.url {
            Some(url) => Some(url.clone()),
            None => open_repository(self.repo.as_deref())?.origin_url(),
        };

        Ok(extract_project_name(remote_url.as_deref()))
    }
}
