//! Capability interface over the version-control engine

use crate::domain::{PullOutcome, PushMode, PushOutcome, SyncIdentity};
use crate::error::VcsError;
use chrono::{DateTime, FixedOffset};
use std::io::Write;
use std::path::Path;

/// Opens or creates repositories
pub trait VersionControl {
    type Workspace: Workspace;

    /// Open the repository rooted exactly at `path`.
    /// Returns `VcsError::RepositoryNotFound` when there is none.
    fn open(&self, path: &Path) -> Result<Self::Workspace, VcsError>;

    /// Initialize a new non-bare repository at `path`
    fn init(&self, path: &Path) -> Result<Self::Workspace, VcsError>;
}

/// Porcelain operations on one repository and its working tree
pub trait Workspace {
    fn create_remote(&mut self, name: &str, url: &str) -> Result<(), VcsError>;

    /// True when there is nothing to stage, untracked files included
    fn is_clean(&self) -> Result<bool, VcsError>;

    /// Stage every change: new, modified and deleted files
    fn stage_all(&mut self) -> Result<(), VcsError>;

    /// Commit the index onto HEAD and return the new commit id
    fn commit(
        &mut self,
        message: &str,
        author: &SyncIdentity,
        when: &DateTime<FixedOffset>,
    ) -> Result<String, VcsError>;

    /// Check out a local branch. With `create`, the branch is created at
    /// HEAD first; `VcsError::BranchNotFound` is returned otherwise.
    fn checkout_branch(&mut self, name: &str, create: bool) -> Result<(), VcsError>;

    /// Fetch `remote` and merge its copy of the current branch.
    /// `author` and `when` stamp a merge commit, if one is needed.
    fn pull(
        &mut self,
        remote: &str,
        author: &SyncIdentity,
        when: &DateTime<FixedOffset>,
    ) -> Result<PullOutcome, VcsError>;

    /// Push the current branch to the same name on `remote`
    fn push(
        &mut self,
        remote: &str,
        mode: PushMode,
        progress: &mut dyn Write,
    ) -> Result<PushOutcome, VcsError>;
}
