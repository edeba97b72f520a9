#![allow(dead_code)]

use assert_cmd::Command;
use chrono::{FixedOffset, TimeZone};
use git2::Repository;
use notesync::application::SyncService;
use notesync::domain::{SyncEnvironment, SyncReport};
use notesync::infrastructure::{Git2Engine, SyncConfig};
use std::fs;
use std::path::{Path, PathBuf};

pub fn notesync_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notesync").unwrap();
    cmd.env("HOME", home);
    cmd.env_remove("NOTESYNC_LOG");
    cmd
}

/// Empty bare repository standing in for the hosted remote
pub fn bare_remote(dir: &Path) -> PathBuf {
    let path = dir.join("remote.git");
    Repository::init_bare(&path).unwrap();
    path
}

pub fn write_config(home: &Path, config: &SyncConfig) {
    fs::write(
        home.join("notesync-config.json"),
        serde_json::to_string_pretty(config).unwrap(),
    )
    .unwrap();
}

pub fn environment(hostname: &str) -> SyncEnvironment {
    let now = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2025, 1, 17, 8, 30, 0)
        .unwrap();
    SyncEnvironment::new(hostname, now)
}

/// Run one sync as `hostname`, returning the report and printed output
pub fn sync(hostname: &str, config: &SyncConfig, home: &Path) -> (SyncReport, String) {
    let mut service = SyncService::new(Git2Engine, environment(hostname), Vec::new());
    let report = service.run(config, home).unwrap();
    let output = String::from_utf8(service.into_output()).unwrap();
    (report, output)
}

/// Commit messages reachable from `reference`, newest first
pub fn history(repo: &Repository, reference: &str) -> Vec<String> {
    let mut walk = repo.revwalk().unwrap();
    walk.push_ref(reference).unwrap();
    walk.map(|oid| {
        repo.find_commit(oid.unwrap())
            .unwrap()
            .message()
            .unwrap_or_default()
            .to_string()
    })
    .collect()
}
