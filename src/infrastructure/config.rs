//! Sync configuration loaded from a JSON file under the home directory

use crate::domain::{BranchName, PushMode};
use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the home directory when no override is given
pub const DEFAULT_CONFIG_FILE: &str = "notesync-config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub github_repo_url: String,
    pub notes_directory: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub push_mode: PushMode,
}

impl SyncConfig {
    pub fn new(github_repo_url: impl Into<String>, notes_directory: impl Into<PathBuf>) -> Self {
        SyncConfig {
            github_repo_url: github_repo_url.into(),
            notes_directory: notes_directory.into(),
            branch_name: None,
            push_mode: PushMode::default(),
        }
    }

    /// Resolve a config file path against the home directory.
    /// Absolute paths are returned unchanged.
    pub fn resolve_path(home: &Path, file: &Path) -> PathBuf {
        home.join(file)
    }

    /// Load and validate the config at `file`, resolved against `home`
    pub fn load(home: &Path, file: &Path) -> Result<Self> {
        let config_path = Self::resolve_path(home, file);
        tracing::debug!(path = %config_path.display(), "loading config");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SyncError::Config(format!(
                    "config file not found: {}",
                    config_path.display()
                ))
            } else {
                SyncError::Config(format!(
                    "cannot read {}: {}",
                    config_path.display(),
                    e
                ))
            }
        })?;

        Self::from_json(&contents).map_err(|e| match e {
            SyncError::Config(msg) => {
                SyncError::Config(format!("{} ({})", msg, config_path.display()))
            }
            other => other,
        })
    }

    /// Parse and validate a JSON document
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: SyncConfig = serde_json::from_str(contents)
            .map_err(|e| SyncError::Config(format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.github_repo_url.trim().is_empty() {
            return Err(SyncError::Config(
                "github_repo_url must not be empty".to_string(),
            ));
        }
        if self.notes_directory.to_string_lossy().trim().is_empty() {
            return Err(SyncError::Config(
                "notes_directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Notes directory with a leading `~` expanded against `home`
    pub fn notes_path(&self, home: &Path) -> PathBuf {
        match self.notes_directory.strip_prefix("~") {
            Ok(rest) => home.join(rest),
            Err(_) => self.notes_directory.clone(),
        }
    }

    /// Branch for this machine: the override, else the hostname
    pub fn branch(&self, hostname: &str) -> BranchName {
        BranchName::resolve(self.branch_name.as_deref(), hostname)
    }
}
