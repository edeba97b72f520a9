//! Ambient machine state: hostname, clock and home directory

use crate::domain::SyncEnvironment;
use crate::error::{Result, SyncError};
use chrono::Local;
use std::path::PathBuf;

/// Build the run environment from the local machine
pub fn detect_environment() -> SyncEnvironment {
    let hostname = gethostname::gethostname().to_string_lossy().into_owned();
    let now = Local::now().fixed_offset();
    SyncEnvironment::new(hostname, now)
}

/// Home directory of the current user
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| SyncError::Config("cannot determine the home directory".to_string()))
}
