//! Git repository operations

use std::path::Path;

use anyhow::{Context, Result};
use git2::{ErrorCode, Repository};
use tracing::debug;

use crate::git::RemoteUrlSource;

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository containing the current directory
    pub fn open() -> Result<Self> {
        let repo = Repository::discover(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Open the repository containing the specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .with_context(|| format!("Failed to open git repository at {}", path.display()))?;

        Ok(Self { repo })
    }
}

impl RemoteUrlSource for GitRepository {
    fn remote_url(&self, name: &str) -> Option<String> {
        let remote = match self.repo.find_remote(name) {
            Ok(remote) => remote,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(remote = name, "Remote not configured");
                return None;
            }
            Err(e) => {
                debug!(remote = name, "Remote lookup failed: {e}");
                return None;
            }
        };

        let url = remote.url().map(str::to_string);
        if url.is_none() {
            debug!(remote = name, "Remote URL is not valid UTF-8");
        }
        url
    }
}
