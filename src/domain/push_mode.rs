//! Push policy

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a push treats a remote branch that has diverged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PushMode {
    /// Overwrite the remote branch; commits only the remote has are lost
    #[default]
    Force,
    /// Fast-forward only; a diverged remote rejects the push
    Safe,
}

impl PushMode {
    /// Refspec pushing `reference` to the same name on the remote
    pub fn refspec(&self, reference: &str) -> String {
        match self {
            PushMode::Force => format!("+{reference}:{reference}"),
            PushMode::Safe => format!("{reference}:{reference}"),
        }
    }
}

impl FromStr for PushMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "force" => Ok(PushMode::Force),
            "safe" => Ok(PushMode::Safe),
            _ => Err(format!(
                "Invalid push mode: '{}'. Valid modes are: force, safe",
                s
            )),
        }
    }
}
