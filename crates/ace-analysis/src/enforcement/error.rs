//! Enforcement errors. A block is an `Err`, never a silent result.

use ace_core::errors::error_code::{self, AceErrorCode};

use super::types::{EnforcementAction, HookTriggerResult};

/// Raised by the executor for a `block` action.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", .action.reason)]
pub struct BlockingError {
    pub action: EnforcementAction,
    pub remediation: Vec<String>,
    pub override_instructions: Option<String>,
}

impl AceErrorCode for BlockingError {
    fn error_code(&self) -> &'static str {
        error_code::ENFORCEMENT_BLOCKED
    }
}

/// Raised by `HookRegistry::trigger` when a non-report-only hook blocked.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Hook {} blocked {} of {} violation(s)", .result.hook_name, .blocks.len(), .result.actions.len())]
pub struct HookBlockedError {
    /// The full trigger result, blocked entries included.
    pub result: HookTriggerResult,
    pub blocks: Vec<BlockingError>,
}

impl AceErrorCode for HookBlockedError {
    fn error_code(&self) -> &'static str {
        error_code::HOOK_BLOCKED
    }
}
