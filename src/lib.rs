//! # commit-fill
//!
//! Per-project fill column for commit message editing.
//!
//! The project is identified by the last path component of the repository's
//! `origin` remote URL and looked up in an ordered [`ProjectWidths`] mapping.
//!
//! ## Quick Start
//!
//! ```rust
//! use commit_fill::{apply, ProjectWidths};
//!
//! let resolution = apply(Some("git@host:org/emacs.git"), &ProjectWidths::default()).unwrap();
//! assert_eq!(resolution.width, 64);
//! assert_eq!(resolution.notice(), "Set fill-column to 64 for project 'emacs'");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod git;
pub mod resolver;
pub mod session;

pub use crate::cli::Cli;
pub use crate::config::{ProjectWidth, ProjectWidths};
pub use crate::resolver::{apply, extract_project_name, resolve_width, Resolution};
pub use crate::session::EditSession;

/// The current version of commit-fill.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
