//! Governance metadata configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PROTECTED_PATHS;

/// Configuration for the governance section of generated signatures.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Protected-path prefixes. Replaces the built-in list when non-empty.
    #[serde(default)]
    pub protected_paths: Vec<String>,
}

impl GovernanceConfig {
    /// Returns the protected paths, sorted, falling back to the built-in list.
    pub fn effective_protected_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = if self.protected_paths.is_empty() {
            DEFAULT_PROTECTED_PATHS.iter().map(|p| p.to_string()).collect()
        } else {
            self.protected_paths.clone()
        };
        paths.sort();
        paths.dedup();
        paths
    }
}
