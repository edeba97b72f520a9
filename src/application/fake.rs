//! In-memory engine for exercising the use cases without a repository

use crate::domain::{PullOutcome, PushMode, PushOutcome, SyncIdentity};
use crate::error::VcsError;
use crate::infrastructure::{VersionControl, Workspace};
use chrono::{DateTime, FixedOffset};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub message: String,
    pub author: SyncIdentity,
}

#[derive(Debug)]
pub struct FakeState {
    pub exists: bool,
    pub open_error: Option<String>,
    pub remote_error: Option<String>,
    pub remotes: Vec<(String, String)>,
    pub dirty: bool,
    pub commit_error: Option<String>,
    pub branches: BTreeSet<String>,
    pub current_branch: String,
    pub refuse_create: bool,
    pub checkout_error: Option<String>,
    pub pull_result: Result<PullOutcome, String>,
    pub push_result: Result<PushOutcome, String>,
    pub pushed_modes: Vec<PushMode>,
    pub commits: Vec<RecordedCommit>,
    pub calls: Vec<String>,
}

impl Default for FakeState {
    fn default() -> Self {
        FakeState {
            exists: true,
            open_error: None,
            remote_error: None,
            remotes: Vec::new(),
            dirty: false,
            commit_error: None,
            branches: BTreeSet::new(),
            current_branch: "master".to_string(),
            refuse_create: false,
            checkout_error: None,
            pull_result: Ok(PullOutcome::AlreadyUpToDate),
            push_result: Ok(PushOutcome::AlreadyUpToDate),
            pushed_modes: Vec::new(),
            commits: Vec::new(),
            calls: Vec::new(),
        }
    }
}

/// Engine whose state stays inspectable through `state` after a run
#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeEngine {
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: &str) {
        self.state.borrow_mut().calls.push(call.to_string());
    }
}

pub struct FakeWorkspace {
    engine: FakeEngine,
}

impl FakeWorkspace {
    fn state(&self) -> std::cell::RefMut<'_, FakeState> {
        self.engine.state.borrow_mut()
    }
}

fn failure(message: &str) -> VcsError {
    git2::Error::from_str(message).into()
}

impl VersionControl for FakeEngine {
    type Workspace = FakeWorkspace;

    fn open(&self, _path: &Path) -> Result<FakeWorkspace, VcsError> {
        self.record("open");
        let state = self.state.borrow();
        if let Some(message) = &state.open_error {
            return Err(failure(message));
        }
        if !state.exists {
            return Err(VcsError::RepositoryNotFound);
        }
        Ok(FakeWorkspace {
            engine: self.clone(),
        })
    }

    fn init(&self, _path: &Path) -> Result<FakeWorkspace, VcsError> {
        self.record("init");
        self.state.borrow_mut().exists = true;
        Ok(FakeWorkspace {
            engine: self.clone(),
        })
    }
}

impl Workspace for FakeWorkspace {
    fn create_remote(&mut self, name: &str, url: &str) -> Result<(), VcsError> {
        self.engine.record(&format!("create_remote {name}"));
        let mut state = self.state();
        if let Some(message) = &state.remote_error {
            return Err(failure(message));
        }
        state.remotes.push((name.to_string(), url.to_string()));
        Ok(())
    }

    fn is_clean(&self) -> Result<bool, VcsError> {
        self.engine.record("status");
        Ok(!self.engine.state.borrow().dirty)
    }

    fn stage_all(&mut self) -> Result<(), VcsError> {
        self.engine.record("stage_all");
        Ok(())
    }

    fn commit(
        &mut self,
        message: &str,
        author: &SyncIdentity,
        _when: &DateTime<FixedOffset>,
    ) -> Result<String, VcsError> {
        self.engine.record("commit");
        let mut state = self.state();
        if let Some(error) = &state.commit_error {
            return Err(failure(error));
        }
        state.dirty = false;
        state.commits.push(RecordedCommit {
            message: message.to_string(),
            author: author.clone(),
        });
        let branch = state.current_branch.clone();
        state.branches.insert(branch);
        Ok(format!("{:040x}", state.commits.len()))
    }

    fn checkout_branch(&mut self, name: &str, create: bool) -> Result<(), VcsError> {
        self.engine.record(&format!("checkout {name} create={create}"));
        let mut state = self.state();
        if create {
            if state.refuse_create || state.branches.contains(name) {
                return Err(failure("cannot create branch"));
            }
            state.branches.insert(name.to_string());
        } else if !state.branches.contains(name) {
            return Err(VcsError::BranchNotFound(name.to_string()));
        } else if let Some(message) = &state.checkout_error {
            return Err(failure(message));
        }
        state.current_branch = name.to_string();
        Ok(())
    }

    fn pull(
        &mut self,
        remote: &str,
        _author: &SyncIdentity,
        _when: &DateTime<FixedOffset>,
    ) -> Result<PullOutcome, VcsError> {
        self.engine.record(&format!("pull {remote}"));
        self.state().pull_result.clone().map_err(|e| failure(&e))
    }

    fn push(
        &mut self,
        remote: &str,
        mode: PushMode,
        progress: &mut dyn Write,
    ) -> Result<PushOutcome, VcsError> {
        self.engine.record(&format!("push {remote}"));
        writeln!(progress, "Writing objects: 1/1 (42 bytes)")?;
        let mut state = self.state();
        state.pushed_modes.push(mode);
        state.push_result.clone().map_err(|e| failure(&e))
    }
}
