//! Hook registry: name-keyed hook configs and the trigger loop.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::classification::ClassifiedViolation;

use super::error::{BlockingError, HookBlockedError};
use super::executor::ActionExecutor;
use super::governance::determine_enforcement_action;
use super::types::{
    EnforcementActionType, EnforcementContext, EnforcementHook, ExecutionResult, HookConfigPatch,
    HookName, HookTriggerResult, TriggerSummary,
};

/// Shared hook registry. Clones share state; writes are last-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    hooks: Arc<RwLock<FxHashMap<HookName, EnforcementHook>>>,
    executor: ActionExecutor,
}

impl HookRegistry {
    /// Empty registry using the default override flag name.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executor(executor: ActionExecutor) -> Self {
        Self {
            hooks: Arc::default(),
            executor,
        }
    }

    pub fn executor(&self) -> &ActionExecutor {
        &self.executor
    }

    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<HookName, EnforcementHook>> {
        self.hooks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<HookName, EnforcementHook>> {
        self.hooks.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or fully replace the hook with this name.
    pub fn register(&self, hook: EnforcementHook) {
        debug!(hook = %hook.name, enabled = hook.enabled, "hook registered");
        self.write().insert(hook.name, hook);
    }

    pub fn unregister(&self, name: HookName) {
        self.write().remove(&name);
    }

    pub fn get(&self, name: HookName) -> Option<EnforcementHook> {
        self.read().get(&name).cloned()
    }

    /// Snapshot of every hook, sorted by name.
    pub fn list(&self) -> Vec<EnforcementHook> {
        let mut hooks: Vec<_> = self.read().values().cloned().collect();
        hooks.sort_by_key(|h| h.name);
        hooks
    }

    /// Shallow-merge `patch` into the hook's config. No-op if absent.
    pub fn update_config(&self, name: HookName, patch: HookConfigPatch) {
        if let Some(hook) = self.write().get_mut(&name) {
            hook.config.apply(patch);
        }
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    /// Decide and execute one action per violation under hook `name`.
    ///
    /// Absent or disabled hooks do not trigger. Any block on a hook that is
    /// not report-only turns the whole trigger into a [`HookBlockedError`].
    pub fn trigger(
        &self,
        name: HookName,
        violations: &[ClassifiedViolation],
        context: &EnforcementContext,
    ) -> Result<HookTriggerResult, HookBlockedError> {
        // Snapshot so the lock is not held while executing.
        let hook = match self.get(name) {
            Some(hook) if hook.enabled => hook,
            _ => {
                debug!(hook = %name, "hook absent or disabled, not triggered");
                return Ok(HookTriggerResult::not_triggered(name));
            }
        };

        let mut result = HookTriggerResult {
            hook_name: name,
            triggered: true,
            actions: Vec::with_capacity(violations.len()),
            results: Vec::with_capacity(violations.len()),
            summary: TriggerSummary::default(),
        };
        let mut blocks: Vec<BlockingError> = Vec::new();

        for violation in violations {
            let action = determine_enforcement_action(violation, &hook, context);
            if hook.config.log_to_console {
                info!(
                    hook = %name,
                    violation = %violation.id,
                    action = %action.action_type,
                    "{}",
                    action.reason
                );
            }

            match self.executor.execute(&action) {
                Ok(exec) => {
                    match exec.action_type {
                        EnforcementActionType::Warn => result.summary.warned += 1,
                        EnforcementActionType::Escalate => result.summary.escalated += 1,
                        EnforcementActionType::RequireApproval => result.summary.approval_required += 1,
                        _ => result.summary.allowed += 1,
                    }
                    result.results.push(exec);
                }
                Err(blocking) => {
                    result.summary.blocked += 1;
                    result.results.push(blocked_result(&blocking));
                    blocks.push(blocking);
                }
            }
            result.actions.push(action);
        }

        info!(
            hook = %name,
            allowed = result.summary.allowed,
            warned = result.summary.warned,
            blocked = result.summary.blocked,
            escalated = result.summary.escalated,
            approval_required = result.summary.approval_required,
            "hook triggered"
        );

        if !blocks.is_empty() && !hook.config.is_report_only() {
            return Err(HookBlockedError { result, blocks });
        }
        Ok(result)
    }
}

fn blocked_result(blocking: &BlockingError) -> ExecutionResult {
    ExecutionResult {
        success: false,
        action_type: EnforcementActionType::Block,
        blocked: true,
        escalated: false,
        approval_required: false,
        message: blocking.action.reason.clone(),
        remediation_steps: Some(blocking.remediation.clone()),
        override_instructions: blocking.override_instructions.clone(),
    }
}
