//! Sync use case: pull, enforce the machine branch, commit, push

use crate::application::provision::{provision, REMOTE_NAME};
use crate::domain::{
    BranchName, BranchStatus, CommitMessage, CommitStatus, PullOutcome, PullStatus, PushMode,
    PushOutcome, PushStatus, SyncEnvironment, SyncIdentity, SyncReport,
};
use crate::error::{Result, SyncError, VcsError};
use crate::infrastructure::{SyncConfig, VersionControl, Workspace};
use std::io::Write;
use std::path::Path;

/// Runs one sync against a notes directory, streaming status lines to `out`
pub struct SyncService<V, W> {
    engine: V,
    environment: SyncEnvironment,
    identity: SyncIdentity,
    out: W,
}

impl<V: VersionControl, W: Write> SyncService<V, W> {
    pub fn new(engine: V, environment: SyncEnvironment, out: W) -> Self {
        SyncService {
            engine,
            environment,
            identity: SyncIdentity::default(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Load the config at `config_file` (resolved against `home`) and run.
    /// A config failure returns before any repository work.
    pub fn run_from_file(
        &mut self,
        home: &Path,
        config_file: &Path,
        push_mode: Option<PushMode>,
    ) -> Result<SyncReport> {
        let mut config = SyncConfig::load(home, config_file)?;
        if let Some(mode) = push_mode {
            config.push_mode = mode;
        }
        self.run(&config, home)
    }

    /// Provision the repository, then pull, enforce the branch, commit and push.
    /// Only provisioning and branch failures are fatal.
    pub fn run(&mut self, config: &SyncConfig, home: &Path) -> Result<SyncReport> {
        let notes_dir = config.notes_path(home);
        let branch_name = config.branch(&self.environment.hostname);
        tracing::info!(
            notes = %notes_dir.display(),
            branch = %branch_name,
            push_mode = ?config.push_mode,
            "starting sync"
        );

        let provisioned = provision(
            &self.engine,
            &notes_dir,
            &config.github_repo_url,
            &mut self.out,
        )?;
        let mut workspace = provisioned.workspace;

        let pull = self.pull(&mut workspace)?;
        let branch = self.ensure_branch(&mut workspace, &branch_name)?;
        let commit = self.commit(&mut workspace)?;
        let push = match commit {
            CommitStatus::Failed(_) => {
                writeln!(self.out, "Push skipped: nothing new was committed.")?;
                PushStatus::Skipped
            }
            _ => self.push(&mut workspace, config.push_mode)?,
        };

        Ok(SyncReport {
            initialized: provisioned.initialized,
            remote_setup_warning: provisioned.remote_setup_warning,
            branch_name,
            pull,
            branch,
            commit,
            push,
        })
    }

    /// Fetch and merge from origin. Failures are reported, never fatal.
    pub fn pull(&mut self, workspace: &mut V::Workspace) -> Result<PullStatus> {
        writeln!(self.out, "Pulling latest changes from remote...")?;

        let status = match workspace.pull(REMOTE_NAME, &self.identity, &self.environment.now) {
            Ok(outcome) => {
                let line = match outcome {
                    PullOutcome::AlreadyUpToDate => "Local is already up to date with remote.",
                    PullOutcome::RemoteEmpty => "Remote repository is empty; nothing to pull.",
                    PullOutcome::NoUpstream => "Remote has no copy of this branch yet.",
                    PullOutcome::FastForward => "Fast-forwarded to remote changes.",
                    PullOutcome::Merged => "Merged remote changes.",
                };
                writeln!(self.out, "{}", line)?;
                PullStatus::Done(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "pull failed");
                writeln!(self.out, "Pull Warning: {} (Proceeding anyway...)", e)?;
                PullStatus::Failed(e.to_string())
            }
        };
        Ok(status)
    }

    /// Check out the machine branch, creating it when it does not exist
    pub fn ensure_branch(
        &mut self,
        workspace: &mut V::Workspace,
        branch: &BranchName,
    ) -> Result<BranchStatus> {
        match workspace.checkout_branch(branch.as_str(), false) {
            Ok(()) => {
                tracing::debug!(branch = %branch, "checked out existing branch");
                Ok(BranchStatus::CheckedOut)
            }
            Err(VcsError::BranchNotFound(_)) => {
                tracing::debug!(branch = %branch, "branch missing; creating");
                writeln!(self.out, "Creating branch for machine: {}", branch)?;
                workspace
                    .checkout_branch(branch.as_str(), true)
                    .map_err(|e| SyncError::Branch {
                        branch: branch.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(BranchStatus::Created)
            }
            Err(e) => Err(SyncError::Branch {
                branch: branch.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Stage and commit everything when the working tree is dirty
    pub fn commit(&mut self, workspace: &mut V::Workspace) -> Result<CommitStatus> {
        let message = CommitMessage::for_sync(&self.environment.hostname, &self.environment.now);

        let attempt = workspace.is_clean().and_then(|clean| {
            if clean {
                return Ok(None);
            }
            workspace.stage_all()?;
            workspace
                .commit(message.as_str(), &self.identity, &self.environment.now)
                .map(Some)
        });

        let status = match attempt {
            Ok(None) => {
                writeln!(self.out, "Working tree clean. Nothing to commit.")?;
                CommitStatus::Clean
            }
            Ok(Some(id)) => {
                tracing::info!(commit = %id, message = %message, "committed");
                writeln!(self.out, "Changes committed locally.")?;
                CommitStatus::Committed(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "commit failed");
                writeln!(self.out, "Commit skipped: {}", e)?;
                CommitStatus::Failed(e.to_string())
            }
        };
        Ok(status)
    }

    /// Push the current branch to origin, once, without retry
    pub fn push(&mut self, workspace: &mut V::Workspace, mode: PushMode) -> Result<PushStatus> {
        writeln!(self.out, "Syncing to remote...")?;
        if mode == PushMode::Force {
            tracing::debug!("force push: commits only on the remote branch will be replaced");
        }

        let status = match workspace.push(REMOTE_NAME, mode, &mut self.out) {
            Ok(outcome) => {
                let line = match outcome {
                    PushOutcome::Pushed => "Push successful!",
                    PushOutcome::AlreadyUpToDate => "Remote is already up to date.",
                    PushOutcome::NothingToPush => "No commits to push yet.",
                };
                writeln!(self.out, "{}", line)?;
                PushStatus::Done(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "push failed");
                writeln!(self.out, "Push Failed: {}", e)?;
                PushStatus::Failed(e.to_string())
            }
        };
        Ok(status)
    }
}
