//! Infrastructure layer - External I/O: config file, machine state, git

pub mod config;
pub mod git;
pub mod system;
pub mod vcs;

pub use config::{SyncConfig, DEFAULT_CONFIG_FILE};
pub use git::{Git2Engine, GitWorkspace};
pub use system::{detect_environment, home_dir};
pub use vcs::{VersionControl, Workspace};
