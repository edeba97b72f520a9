//! Output formatting utilities

use crate::domain::{BranchStatus, CommitStatus, PullStatus, PushOutcome, PushStatus, SyncReport};

/// One-line summary of a finished run
pub fn format_report(report: &SyncReport) -> String {
    let branch = match report.branch {
        BranchStatus::CheckedOut => format!("on {}", report.branch_name),
        BranchStatus::Created => format!("on new branch {}", report.branch_name),
    };

    let commit = match &report.commit {
        CommitStatus::Committed(_) => "committed",
        CommitStatus::Clean => "nothing to commit",
        CommitStatus::Failed(_) => "commit failed",
    };

    let push = match &report.push {
        PushStatus::Done(PushOutcome::Pushed) => "pushed",
        PushStatus::Done(PushOutcome::AlreadyUpToDate) => "remote up to date",
        PushStatus::Done(PushOutcome::NothingToPush) => "nothing to push",
        PushStatus::Skipped => "push skipped",
        PushStatus::Failed(_) => "push failed",
    };

    let mut summary = format!("Sync finished {}: {}, {}", branch, commit, push);
    if matches!(report.pull, PullStatus::Failed(_)) {
        summary.push_str(" (pull failed)");
    }
    if report.remote_setup_warning.is_some() {
        summary.push_str(" (remote not configured)");
    }
    summary
}
