//! Action executor. Turns a decided action into an execution result.

use ace_core::config::EnforcementConfig;
use ace_core::constants::DEFAULT_OVERRIDE_ENV_VAR;
use tracing::{error, info, warn};

use super::error::BlockingError;
use super::types::{EnforcementAction, EnforcementActionType, ExecutionResult};

/// Executes enforcement actions, naming the configured override flag in
/// blocking errors.
#[derive(Debug, Clone)]
pub struct ActionExecutor {
    override_env_var: String,
}

impl Default for ActionExecutor {
    fn default() -> Self {
        Self {
            override_env_var: DEFAULT_OVERRIDE_ENV_VAR.to_string(),
        }
    }
}

impl ActionExecutor {
    pub fn new(config: &EnforcementConfig) -> Self {
        Self {
            override_env_var: config.effective_override_env_var().to_string(),
        }
    }

    pub fn override_env_var(&self) -> &str {
        &self.override_env_var
    }

    /// Execute `action`. A `block` returns `Err`; every other type succeeds.
    pub fn execute(&self, action: &EnforcementAction) -> Result<ExecutionResult, BlockingError> {
        match action.action_type {
            EnforcementActionType::Allow => {
                Ok(ExecutionResult::passed(EnforcementActionType::Allow, "Operation allowed"))
            }
            EnforcementActionType::Warn => {
                warn!(
                    violation = %action.violation.id,
                    "[Enforcement Warning] {}: {}",
                    action.reason,
                    action.violation.description()
                );
                Ok(ExecutionResult::passed(EnforcementActionType::Warn, action.reason.clone()))
            }
            EnforcementActionType::Block => Err(self.blocking_error(action)),
            EnforcementActionType::Escalate => {
                warn!(
                    violation = %action.violation.id,
                    "[Enforcement Escalation] {}: violation escalated to owner for review",
                    action.reason
                );
                Ok(ExecutionResult::passed(EnforcementActionType::Escalate, action.reason.clone()))
            }
            EnforcementActionType::RequireApproval => {
                let boundary = action
                    .governance_context
                    .cs_boundary
                    .map(|b| b.name())
                    .unwrap_or("CS2");
                warn!(
                    violation = %action.violation.id,
                    "[Enforcement Approval Required] {}: {boundary} approval workflow triggered",
                    action.reason
                );
                Ok(ExecutionResult::passed(
                    EnforcementActionType::RequireApproval,
                    format!("{} - CS2 approval workflow required", action.reason),
                ))
            }
            EnforcementActionType::Unknown => {
                info!(violation = %action.violation.id, "unknown enforcement action type, allowing");
                Ok(ExecutionResult::passed(
                    EnforcementActionType::Allow,
                    "Unknown action type, allowing by default",
                ))
            }
        }
    }

    fn blocking_error(&self, action: &EnforcementAction) -> BlockingError {
        error!(
            violation = %action.violation.id,
            "[Enforcement Block] {}: {}",
            action.reason,
            action.violation.description()
        );
        let remediation = vec![
            format!("1. Review the violation: {}", action.violation.description()),
            format!("2. Fix the {} issue", action.violation.category),
            "3. Run enforcement check again to verify".to_string(),
        ];
        let override_instructions = action
            .governance_context
            .override_allowed
            .then(|| format!("Override: Set {}=true with justification", self.override_env_var));
        BlockingError {
            action: action.clone(),
            remediation,
            override_instructions,
        }
    }
}

/// Execute `action` with the default override flag name.
pub fn execute_enforcement_action(action: &EnforcementAction) -> Result<ExecutionResult, BlockingError> {
    ActionExecutor::default().execute(action)
}

/// Whether the operator set the override flag (`true` or `1`).
///
/// Informational only: the executor never consults it. The orchestrating
/// caller decides whether to honor a block override.
pub fn enforcement_override_requested(env_var: &str) -> bool {
    std::env::var(env_var)
        .map(|v| {
            let v = v.trim();
            v.eq_ignore_ascii_case("true") || v == "1"
        })
        .unwrap_or(false)
}
