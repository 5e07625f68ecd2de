//! Fill command — reflows a commit message at the project fill column.
//!
//! Intended for `prepare-commit-msg`/`commit-msg` hooks and editor filters.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::SourceArgs;
use crate::session::{EditSession, ProjectWidthHook};

/// Fill command options.
#[derive(Parser)]
pub struct FillCommand {
    /// Commit message file (e.g. .git/COMMIT_EDITMSG).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Repository and configuration selection.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fill column to use regardless of the project configuration.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Rewrites FILE instead of printing the result.
    #[arg(long)]
    pub in_place: bool,
}

impl FillCommand {
    /// Executes the fill command.
    pub fn execute(self) -> Result<()> {
        let message = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read commit message: {}", self.file.display()))?;

        let session = self.prepare_session()?;
        for notice in session.notices() {
            eprintln!("{notice}");
        }

        let filled = session.fill_message(&message);
        if self.in_place {
            fs::write(&self.file, filled).with_context(|| {
                format!("Failed to write commit message: {}", self.file.display())
            })?;
        } else {
            print!("{filled}");
        }

        Ok(())
    }

    /// Sets up the editing session the message is filled in.
    fn prepare_session(&self) -> Result<EditSession> {
        let mapping = self.source.load_mapping()?;
        let source = self.source.remote_source()?;

        let mut session = EditSession::new();
        session.run_setup_hooks(&*source, &[&ProjectWidthHook::new(&mapping)]);
        if let Some(width) = self.width {
            session.set_fill_column(usize::from(width));
        }

        Ok(session)
    }
}
