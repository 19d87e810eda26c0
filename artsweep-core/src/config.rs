//! Cleanup configuration
//!
//! The YAML cleanup plan: which repositories to sweep, which paths inside
//! them, how long artifacts are retained, where recycled copies go and which
//! paths must never be touched.
//!
//! ```yaml
//! recycle: art-recycle-generic-local
//! skip_list:
//!   - builds/release
//! repos:
//!   art-mint-generic-local:
//!     retention: 30d
//!     paths:
//!       - builds/dev/HelloWorld
//!       - logs/nightly|file
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::path_spec::PathSpecifier;
use crate::domain::retention::RetentionPeriod;
use crate::domain::skip_list::SkipList;

/// Errors raised while loading the cleanup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The whole cleanup plan for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Base URL of the artifact repository service
    #[serde(default)]
    pub host: Option<String>,

    /// Repository every deleted artifact is copied to first
    pub recycle: String,

    /// Paths that can never be copied or deleted
    #[serde(default)]
    pub skip_list: SkipList,

    /// Repositories to sweep, in the order they are processed
    pub repos: IndexMap<String, RepoRetention>,
}

/// Retention settings of one repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoRetention {
    pub retention: RetentionPeriod,
    pub paths: Vec<PathSpecifier>,
}

impl SweepConfig {
    /// Reads, parses and validates a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parses and validates a config document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: SweepConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recycle.trim().is_empty() {
            return Err(ConfigError::Invalid("recycle cannot be empty".to_string()));
        }

        for (repo, settings) in &self.repos {
            if repo.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "repository name cannot be empty".to_string(),
                ));
            }
            if settings.retention.as_str().trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "repository '{}' has an empty retention",
                    repo
                )));
            }
            if settings.paths.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "repository '{}' has no paths",
                    repo
                )));
            }
        }

        Ok(())
    }

    /// Every (repository, settings, path) unit in processing order
    pub fn units(&self) -> impl Iterator<Item = (&str, &RepoRetention, &PathSpecifier)> {
        self.repos.iter().flat_map(|(repo, settings)| {
            settings
                .paths
                .iter()
                .map(move |spec| (repo.as_str(), settings, spec))
        })
    }

    /// Number of configured (repository, path) units
    pub fn unit_count(&self) -> usize {
        self.repos.values().map(|r| r.paths.len()).sum()
    }
}
