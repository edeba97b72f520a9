//! Provision the local notes repository

use crate::error::{Result, SyncError, VcsError};
use crate::infrastructure::{VersionControl, Workspace};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Remote every sync pulls from and pushes to
pub const REMOTE_NAME: &str = "origin";

/// A usable repository plus what provisioning had to do to get it
pub struct ProvisionedRepository<W> {
    pub workspace: W,
    pub initialized: bool,
    pub remote_setup_warning: Option<String>,
}

/// Open the repository at `path`, creating the directory and initializing
/// a repository with an `origin` remote when needed.
pub fn provision<V: VersionControl>(
    engine: &V,
    path: &Path,
    remote_url: &str,
    out: &mut dyn Write,
) -> Result<ProvisionedRepository<V::Workspace>> {
    if !path.exists() {
        writeln!(out, "Creating directory: {}", path.display())?;
        fs::create_dir_all(path).map_err(|e| {
            SyncError::Provision(format!("cannot create {}: {}", path.display(), e))
        })?;
    }

    match engine.open(path) {
        Ok(workspace) => {
            tracing::debug!(path = %path.display(), "opened existing repository");
            Ok(ProvisionedRepository {
                workspace,
                initialized: false,
                remote_setup_warning: None,
            })
        }
        Err(VcsError::RepositoryNotFound) => {
            writeln!(out, "Initializing new Git repository...")?;
            let mut workspace = engine.init(path).map_err(|e| {
                SyncError::Provision(format!("init failed at {}: {}", path.display(), e))
            })?;

            let remote_setup_warning = match workspace.create_remote(REMOTE_NAME, remote_url) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(error = %e, url = remote_url, "remote setup failed");
                    writeln!(out, "Remote setup: {}", e)?;
                    Some(e.to_string())
                }
            };

            Ok(ProvisionedRepository {
                workspace,
                initialized: true,
                remote_setup_warning,
            })
        }
        Err(e) => Err(SyncError::Provision(format!(
            "failed to open repository at {}: {}",
            path.display(),
            e
        ))),
    }
}
