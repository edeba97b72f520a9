//! Ambient values injected into a sync run

use chrono::{DateTime, FixedOffset};

/// Machine-specific inputs of a run, passed in rather than read ambiently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEnvironment {
    pub hostname: String,
    pub now: DateTime<FixedOffset>,
}

impl SyncEnvironment {
    pub fn new(hostname: impl Into<String>, now: DateTime<FixedOffset>) -> Self {
        SyncEnvironment {
            hostname: hostname.into(),
            now,
        }
    }
}
