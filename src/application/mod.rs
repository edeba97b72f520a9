//! Application layer - Use cases and orchestration

pub mod provision;
pub mod sync;

#[cfg(test)]
pub(crate) mod fake;

pub use provision::{provision, ProvisionedRepository, REMOTE_NAME};
pub use sync::SyncService;
