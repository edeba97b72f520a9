//! notesync - keep a notes directory in sync with a remote git repository
//!
//! Each run pulls from `origin`, checks out a branch named after the
//! machine, commits local changes and pushes them back.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::SyncError;
