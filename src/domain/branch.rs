//! Machine branch naming

use std::fmt;

/// Name of the branch a machine syncs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(String);

impl BranchName {
    /// Resolve the branch for this run: the configured override when it is
    /// non-blank, otherwise the hostname.
    pub fn resolve(configured: Option<&str>, hostname: &str) -> Self {
        let name = configured
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| hostname.trim());

        BranchName(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
