//! Project width resolution.
//!
//! Derives a project name from a remote URL and looks it up in the
//! configured [`ProjectWidths`]. Everything here is pure: no I/O and no
//! session state is touched.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProjectWidths;

/// Suffix stripped from remote URLs before taking the final component.
const GIT_SUFFIX: &str = ".git";

/// Path separator used when splitting remote URLs.
const SEPARATOR: char = '/';

/// A successful width lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Project name derived from the remote URL.
    pub project: String,
    /// Fill column configured for the project.
    pub width: usize,
}

impl Resolution {
    /// Returns the notice shown to the user once the width has been applied.
    pub fn notice(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Set fill-column to {} for project '{}'",
            self.width, self.project
        )
    }
}

/// Extracts the project name from a remote URL.
///
/// Trailing separators are ignored, a trailing `.git` is removed and the last
/// `/`-separated component is returned. A URL without separators yields the
/// whole stripped string. An empty result is reported as `None`.
pub fn extract_project_name(remote_url: Option<&str>) -> Option<String> {
    let url = remote_url?.trim_end_matches(SEPARATOR);
    let url = url.strip_suffix(GIT_SUFFIX).unwrap_or(url);
    // `/srv/repos/emacs/.git`
    let url = url.trim_end_matches(SEPARATOR);

    let name = url.rsplit(SEPARATOR).next().unwrap_or(url);
    if name.is_empty() {
        return None;
    }

    Some(name.to_string())
}

/// Returns the width of the first entry whose project equals `project_name`.
pub fn resolve_width(project_name: Option<&str>, mapping: &ProjectWidths) -> Option<usize> {
    let project_name = project_name?;
    mapping
        .iter()
        .find(|entry| entry.project == project_name)
        .map(|entry| entry.width)
}

/// Resolves the width for the repository whose remote is `remote_url`.
pub fn apply(remote_url: Option<&str>, mapping: &ProjectWidths) -> Option<Resolution> {
    let project = extract_project_name(remote_url)?;
    let Some(width) = resolve_width(Some(&project), mapping) else {
        debug!(project = %project, "No fill column configured for project");
        return None;
    };

    debug!(project = %project, width, "Resolved fill column");
    Some(Resolution { project, width })
}
