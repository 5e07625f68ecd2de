//! Project width configuration.
//!
//! The mapping is read once from `$HOME/.commit-fill/projects.yaml` (or the
//! file named by `COMMIT_FILL_CONFIG`) and passed explicitly to the resolver.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV_VAR: &str = "COMMIT_FILL_CONFIG";

/// Fill column used by a session when no project width applies.
pub const DEFAULT_FILL_COLUMN: usize = 72;

/// Configuration validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A project was configured with a zero width.
    #[error("Invalid width for project '{project}': width must be a positive integer")]
    InvalidWidth {
        /// Project carrying the invalid width.
        project: String,
    },

    /// A `NAME=WIDTH` override could not be parsed.
    #[error("Invalid project width '{0}'. Expected NAME=WIDTH")]
    InvalidOverride(String),
}

/// A single project to width pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectWidth {
    /// Project name, compared case-sensitively against the derived name.
    pub project: String,
    /// Fill column for commit messages of this project.
    pub width: usize,
}

impl ProjectWidth {
    /// Creates a new entry.
    pub fn new(project: impl Into<String>, width: usize) -> Self {
        Self {
            project: project.into(),
            width,
        }
    }

    /// Parses a `NAME=WIDTH` command-line override.
    pub fn parse_override(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidOverride(s.to_string());

        let (project, width) = s.split_once('=').ok_or_else(invalid)?;
        if project.is_empty() {
            return Err(invalid());
        }
        let width = width.trim().parse::<usize>().map_err(|_| invalid())?;
        if width == 0 {
            return Err(ConfigError::InvalidWidth {
                project: project.to_string(),
            });
        }

        Ok(Self::new(project, width))
    }
}

/// Ordered project to width mapping. The first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectWidths {
    projects: Vec<ProjectWidth>,
}

impl Default for ProjectWidths {
    fn default() -> Self {
        Self {
            projects: vec![ProjectWidth::new("emacs", 64), ProjectWidth::new("auctex", 64)],
        }
    }
}

/// On-disk layout of the configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    projects: Option<Vec<ProjectWidth>>,
}

impl ProjectWidths {
    /// Creates a mapping, rejecting zero widths.
    pub fn new(projects: Vec<ProjectWidth>) -> Result<Self, ConfigError> {
        if let Some(entry) = projects.iter().find(|entry| entry.width == 0) {
            return Err(ConfigError::InvalidWidth {
                project: entry.project.clone(),
            });
        }

        Ok(Self { projects })
    }

    /// Returns a mapping with `overrides` placed ahead of the existing entries.
    pub fn with_overrides(self, overrides: Vec<ProjectWidth>) -> Result<Self, ConfigError> {
        let mut projects = overrides;
        projects.extend(self.projects);
        Self::new(projects)
    }

    /// Iterates entries in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectWidth> {
        self.projects.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns `true` if no project is configured.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Parses a mapping from YAML text.
    ///
    /// A document without a `projects` key keeps the default entries.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: Option<ConfigFile> = if yaml.trim().is_empty() {
            None
        } else {
            serde_yaml::from_str(yaml).context("Failed to deserialize configuration YAML")?
        };

        match file.and_then(|file| file.projects) {
            Some(projects) => Ok(Self::new(projects)?),
            None => Ok(Self::default()),
        }
    }

    /// Renders the mapping as YAML in the configuration file layout.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Loads the mapping from `path`, or from the default location.
    ///
    /// An explicitly given path must exist. A missing file at the default or
    /// environment-supplied location yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let path = config_path()?;
                if !path.exists() {
                    debug!(path = %path.display(), "No configuration file, using defaults");
                    return Ok(Self::default());
                }
                Self::load_from_path(&path)
            }
        }
    }

    /// Loads the mapping from a specific file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let widths = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;
        debug!(path = %path.display(), entries = widths.len(), "Loaded project widths");

        Ok(widths)
    }
}

/// Returns the configuration path, honouring [`CONFIG_ENV_VAR`].
pub fn config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home_dir.join(".commit-fill").join("projects.yaml"))
}
