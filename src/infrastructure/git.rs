//! libgit2-backed version-control engine

use crate::domain::{PullOutcome, PushMode, PushOutcome, SyncIdentity};
use crate::error::VcsError;
use crate::infrastructure::vcs::{VersionControl, Workspace};
use chrono::{DateTime, FixedOffset};
use git2::build::CheckoutBuilder;
use git2::{
    BranchType, Commit, Cred, CredentialType, ErrorCode, FetchOptions, IndexAddOption,
    Oid, PushOptions, Remote, RemoteCallbacks, Repository, Signature, StatusOptions, Time,
};
use std::io::Write;
use std::path::Path;

/// libgit2 gives up only when the callback errors, so rejected
/// credentials would otherwise be offered forever.
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Engine that opens and initializes repositories through git2
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Engine;

impl VersionControl for Git2Engine {
    type Workspace = GitWorkspace;

    fn open(&self, path: &Path) -> Result<GitWorkspace, VcsError> {
        match Repository::open(path) {
            Ok(repo) => Ok(GitWorkspace { repo }),
            Err(e) if e.code() == ErrorCode::NotFound => Err(VcsError::RepositoryNotFound),
            Err(e) => Err(e.into()),
        }
    }

    fn init(&self, path: &Path) -> Result<GitWorkspace, VcsError> {
        let repo = Repository::init(path)?;
        Ok(GitWorkspace { repo })
    }
}

/// An open repository with a working tree
pub struct GitWorkspace {
    repo: Repository,
}

impl GitWorkspace {
    /// Name HEAD points at, e.g. refs/heads/laptop. Works on an unborn branch.
    fn head_reference_name(&self) -> Result<String, VcsError> {
        let head = self.repo.find_reference("HEAD")?;
        head.symbolic_target()
            .map(str::to_string)
            .ok_or_else(|| git2::Error::from_str("HEAD is detached; check out a branch").into())
    }

    fn reference_oid(&self, reference: &str) -> Result<Option<Oid>, VcsError> {
        match self.repo.refname_to_id(reference) {
            Ok(oid) => Ok(Some(oid)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_remote(&self, name: &str) -> Result<Remote<'_>, VcsError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote),
            Err(e) if e.code() == ErrorCode::NotFound => {
                Err(VcsError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn has_remote_refs(&self, remote: &str) -> Result<bool, VcsError> {
        let mut refs = self
            .repo
            .references_glob(&format!("refs/remotes/{remote}/*"))?;
        Ok(refs.next().is_some())
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>, VcsError> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Update the working tree and index to `commit` without touching
    /// files that have local modifications.
    fn checkout_commit(&self, commit: &Commit<'_>) -> Result<(), VcsError> {
        self.repo
            .checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().safe()))?;
        Ok(())
    }

    fn merge_diverged(
        &self,
        local_ref: &str,
        tracking_ref: &str,
        remote_oid: Oid,
        author: &SyncIdentity,
        when: &DateTime<FixedOffset>,
    ) -> Result<PullOutcome, VcsError> {
        let local_commit = self.repo.find_reference(local_ref)?.peel_to_commit()?;
        let remote_commit = self.repo.find_commit(remote_oid)?;

        let mut merged = self
            .repo
            .merge_commits(&local_commit, &remote_commit, None)?;
        if merged.has_conflicts() {
            return Err(VcsError::MergeConflict(tracking_ref.to_string()));
        }

        let tree_id = merged.write_tree_to(&self.repo)?;
        let tree = self.repo.find_tree(tree_id)?;
        self.repo
            .checkout_tree(tree.as_object(), Some(CheckoutBuilder::new().safe()))?;

        let signature = signature(author, when)?;
        let short_tracking = tracking_ref
            .strip_prefix("refs/remotes/")
            .unwrap_or(tracking_ref);
        let message = format!("Merge remote-tracking branch '{short_tracking}'");
        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &message,
            &tree,
            &[&local_commit, &remote_commit],
        )?;

        Ok(PullOutcome::Merged)
    }
}

impl Workspace for GitWorkspace {
    fn create_remote(&mut self, name: &str, url: &str) -> Result<(), VcsError> {
        self.repo.remote(name, url)?;
        Ok(())
    }

    fn is_clean(&self) -> Result<bool, VcsError> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }

    fn stage_all(&mut self) -> Result<(), VcsError> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        // add_all never drops entries whose files are gone
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    fn commit(
        &mut self,
        message: &str,
        author: &SyncIdentity,
        when: &DateTime<FixedOffset>,
    ) -> Result<String, VcsError> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = signature(author, when)?;

        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(oid.to_string())
    }

    fn checkout_branch(&mut self, name: &str, create: bool) -> Result<(), VcsError> {
        let reference = format!("refs/heads/{name}");

        if !create {
            let branch = match self.repo.find_branch(name, BranchType::Local) {
                Ok(branch) => branch,
                Err(e) if e.code() == ErrorCode::NotFound => {
                    return Err(VcsError::BranchNotFound(name.to_string()));
                }
                Err(e) => return Err(e.into()),
            };
            let target = branch.get().peel_to_commit()?;
            self.checkout_commit(&target)?;
            self.repo.set_head(&reference)?;
            return Ok(());
        }

        match self.head_commit()? {
            Some(commit) => {
                self.repo.branch(name, &commit, false)?;
                self.checkout_commit(&commit)?;
                self.repo.set_head(&reference)?;
            }
            // Nothing to branch from yet: the first commit creates it
            None => self.repo.set_head(&reference)?,
        }
        Ok(())
    }

    fn pull(
        &mut self,
        remote_name: &str,
        author: &SyncIdentity,
        when: &DateTime<FixedOffset>,
    ) -> Result<PullOutcome, VcsError> {
        let mut remote = self.find_remote(remote_name)?;
        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());
        remote.fetch::<&str>(&[], Some(&mut fetch_options), None)?;

        let local_ref = self.head_reference_name()?;
        let branch = local_ref.strip_prefix("refs/heads/").unwrap_or(&local_ref);
        let tracking_ref = format!("refs/remotes/{remote_name}/{branch}");

        let remote_oid = match self.reference_oid(&tracking_ref)? {
            Some(oid) => oid,
            None if self.has_remote_refs(remote_name)? => return Ok(PullOutcome::NoUpstream),
            None => return Ok(PullOutcome::RemoteEmpty),
        };

        let fetched = self.repo.find_annotated_commit(remote_oid)?;
        let (analysis, _) = self.repo.merge_analysis(&[&fetched])?;

        if analysis.is_up_to_date() {
            return Ok(PullOutcome::AlreadyUpToDate);
        }

        if analysis.is_unborn() {
            let commit = self.repo.find_commit(remote_oid)?;
            self.checkout_commit(&commit)?;
            self.repo
                .reference(&local_ref, remote_oid, false, "pull: initial checkout")?;
            self.repo.set_head(&local_ref)?;
            return Ok(PullOutcome::FastForward);
        }

        if analysis.is_fast_forward() {
            let commit = self.repo.find_commit(remote_oid)?;
            self.checkout_commit(&commit)?;
            let mut reference = self.repo.find_reference(&local_ref)?;
            reference.set_target(remote_oid, "pull: fast-forward")?;
            return Ok(PullOutcome::FastForward);
        }

        self.merge_diverged(&local_ref, &tracking_ref, remote_oid, author, when)
    }

    fn push(
        &mut self,
        remote_name: &str,
        mode: PushMode,
        progress: &mut dyn Write,
    ) -> Result<PushOutcome, VcsError> {
        let reference = self.head_reference_name()?;
        let local_oid = match self.reference_oid(&reference)? {
            Some(oid) => oid,
            None => return Ok(PushOutcome::NothingToPush),
        };

        let mut remote = self.find_remote(remote_name)?;

        // The tracking ref is as fresh as the last fetch or push
        let branch = reference.strip_prefix("refs/heads/").unwrap_or(&reference);
        let tracking_ref = format!("refs/remotes/{remote_name}/{branch}");
        if self.reference_oid(&tracking_ref)? == Some(local_oid) {
            return Ok(PushOutcome::AlreadyUpToDate);
        }

        let mut rejection: Option<String> = None;
        {
            let mut callbacks = remote_callbacks();
            callbacks.push_transfer_progress(|current, total, bytes| {
                // Progress output is best effort
                let _ = writeln!(progress, "Writing objects: {current}/{total} ({bytes} bytes)");
            });
            callbacks.push_update_reference(|_refname, status| {
                if let Some(message) = status {
                    rejection = Some(message.to_string());
                }
                Ok(())
            });

            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);
            remote.push(&[mode.refspec(&reference)], Some(&mut options))?;
        }

        match rejection {
            Some(message) => Err(VcsError::PushRejected { reference, message }),
            None => Ok(PushOutcome::Pushed),
        }
    }
}

fn signature(
    identity: &SyncIdentity,
    when: &DateTime<FixedOffset>,
) -> Result<Signature<'static>, VcsError> {
    let offset_minutes = when.offset().local_minus_utc() / 60;
    let time = Time::new(when.timestamp(), offset_minutes);
    Ok(Signature::new(&identity.name, &identity.email, &time)?)
}

/// Callbacks shared by fetch and push: SSH agent, then the git
/// credential helper, then libgit2's default credential.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts = 0;

    callbacks.credentials(move |url, username, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str(&format!(
                "authentication to {url} failed after {MAX_CREDENTIAL_ATTEMPTS} attempts"
            )));
        }
        tracing::debug!(url, ?allowed, attempts, "credentials requested");

        if allowed.contains(CredentialType::SSH_KEY) {
            return Cred::ssh_key_from_agent(username.unwrap_or("git"));
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            let config = git2::Config::open_default()?;
            return Cred::credential_helper(&config, url, username);
        }
        if allowed.contains(CredentialType::USERNAME) {
            return Cred::username(username.unwrap_or("git"));
        }
        Cred::default()
    });

    callbacks
}
