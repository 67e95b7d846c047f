//! Enforcement configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_OVERRIDE_ENV_VAR;

/// Configuration for the enforcement engine and action executor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnforcementConfig {
    /// Environment variable named in override instructions. Default: `ACE_ENFORCEMENT_OVERRIDE`.
    pub override_env_var: Option<String>,
}

impl EnforcementConfig {
    pub fn effective_override_env_var(&self) -> &str {
        self.override_env_var
            .as_deref()
            .unwrap_or(DEFAULT_OVERRIDE_ENV_VAR)
    }
}
