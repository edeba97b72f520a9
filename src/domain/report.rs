//! Per-run outcomes of each sync stage

use crate::domain::{BranchName, CommitMessage};

/// Successful results of a pull
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    AlreadyUpToDate,
    /// The remote has no refs at all
    RemoteEmpty,
    /// The remote has refs, but none for the current branch
    NoUpstream,
    FastForward,
    Merged,
}

/// Successful results of a push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    AlreadyUpToDate,
    /// The branch has no commits yet
    NothingToPush,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullStatus {
    Done(PullOutcome),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStatus {
    CheckedOut,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitStatus {
    Committed(CommitMessage),
    Clean,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    Done(PushOutcome),
    /// Not attempted because the commit failed
    Skipped,
    Failed(String),
}

/// What a completed run did, stage by stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub initialized: bool,
    pub remote_setup_warning: Option<String>,
    pub branch_name: BranchName,
    pub pull: PullStatus,
    pub branch: BranchStatus,
    pub commit: CommitStatus,
    pub push: PushStatus,
}

impl SyncReport {
    /// True when no stage reported a warning or failure
    pub fn is_clean_run(&self) -> bool {
        self.remote_setup_warning.is_none()
            && !matches!(self.pull, PullStatus::Failed(_))
            && !matches!(self.commit, CommitStatus::Failed(_))
            && matches!(self.push, PushStatus::Done(_))
    }
}
