//! Error types for notesync

use thiserror::Error;

/// Errors surfaced by the version-control engine
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("repository does not exist")]
    RepositoryNotFound,

    #[error("branch '{0}' does not exist")]
    BranchNotFound(String),

    #[error("remote '{0}' is not configured")]
    RemoteNotFound(String),

    #[error("merge with {0} has conflicts; resolve them manually")]
    MergeConflict(String),

    #[error("remote rejected {reference}: {message}")]
    PushRejected { reference: String, message: String },

    #[error("{0}")]
    Git(#[from] git2::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Fatal errors that end a sync run
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository error: {0}")]
    Provision(String),

    #[error("Branch error: could not check out '{branch}': {message}")]
    Branch { branch: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SyncError::Config(msg) if msg.contains("not found") => {
                format!(
                    "{}\n\n\
                    Create the file with content like:\n\
                    {{\n  \
                      \"github_repo_url\": \"git@github.com:you/notes.git\",\n  \
                      \"notes_directory\": \"~/notes\"\n\
                    }}\n\n\
                    Optional keys: branch_name, push_mode (\"force\" or \"safe\")",
                    self
                )
            }
            SyncError::Config(msg) if msg.contains("unknown variant") => {
                format!("{}\n\nValid push modes: force, safe", self)
            }
            SyncError::Provision(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that notes_directory points to a writable location\n\
                    • If the directory holds a damaged .git folder, repair or remove it",
                    self
                )
            }
            SyncError::Branch { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Local edits may conflict with files on that branch; commit or move them\n\
                    • Set branch_name in the config to use a different branch",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_shows_sample() {
        let err = SyncError::Config("config file not found: /home/u/notesync-config.json".into());
        let msg = err.display_with_suggestions();
        assert!(msg.starts_with("Configuration error: config file not found"));
        assert!(msg.contains("github_repo_url"));
        assert!(msg.contains("notes_directory"));
        assert!(msg.contains("push_mode"));
    }

    #[test]
    fn test_push_mode_suggestions() {
        let err = SyncError::Config(
            "malformed config: unknown variant `sometimes`, expected `force` or `safe`".into(),
        );
        let msg = err.display_with_suggestions();
        assert!(msg.contains("Valid push modes: force, safe"));
    }

    #[test]
    fn test_branch_error_suggestions() {
        let err = SyncError::Branch {
            branch: "laptop".into(),
            message: "conflict".into(),
        };
        let msg = err.display_with_suggestions();
        assert!(msg.starts_with("Branch error: could not check out 'laptop': conflict"));
        assert!(msg.contains("branch_name"));
    }

    #[test]
    fn test_provision_error_suggestions() {
        let err = SyncError::Provision("permission denied".into());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("writable"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = SyncError::Config("malformed JSON".into());
        assert_eq!(
            err.display_with_suggestions(),
            "Configuration error: malformed JSON"
        );
    }

    #[test]
    fn test_vcs_error_wraps_git2() {
        let err: VcsError = git2::Error::from_str("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
