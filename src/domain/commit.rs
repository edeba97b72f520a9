//! Commit message and author identity for sync commits

use chrono::{DateTime, FixedOffset};
use std::fmt;

/// Timestamp layout used in commit messages (e.g. 2025-01-17 08:30:00)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Synthetic author recorded on every sync and merge commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncIdentity {
    pub name: String,
    pub email: String,
}

impl Default for SyncIdentity {
    fn default() -> Self {
        SyncIdentity {
            name: "Notesync".to_string(),
            email: "sync@notesync.local".to_string(),
        }
    }
}

/// Message of the form `Sync: <hostname> [<timestamp>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    pub fn for_sync(hostname: &str, when: &DateTime<FixedOffset>) -> Self {
        CommitMessage(format!(
            "Sync: {} [{}]",
            hostname,
            when.format(TIMESTAMP_FORMAT)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
