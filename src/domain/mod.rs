//! Domain layer - Sync values and per-run outcomes

pub mod branch;
pub mod commit;
pub mod environment;
pub mod push_mode;
pub mod report;

pub use branch::BranchName;
pub use commit::{CommitMessage, SyncIdentity};
pub use environment::SyncEnvironment;
pub use push_mode::PushMode;
pub use report::{
    BranchStatus, CommitStatus, PullOutcome, PullStatus, PushOutcome, PushStatus, SyncReport,
};
