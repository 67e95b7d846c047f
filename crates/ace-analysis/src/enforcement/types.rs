//! Enforcement hook, action and result types.

use serde::{Deserialize, Serialize};

use crate::classification::{ClassifiedViolation, ViolationNature, ViolationSeverity};

/// The three lifecycle points where enforcement runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookName {
    PreMerge,
    PreBuild,
    RuntimeValidation,
}

impl HookName {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreMerge => "pre-merge",
            Self::PreBuild => "pre-build",
            Self::RuntimeValidation => "runtime-validation",
        }
    }

    pub fn all() -> &'static [HookName] {
        &[Self::PreMerge, Self::PreBuild, Self::RuntimeValidation]
    }
}

impl std::fmt::Display for HookName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-hook policy. Lists left out of a config file default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookConfig {
    #[serde(default)]
    pub block_on_severity: Vec<ViolationSeverity>,
    #[serde(default)]
    pub warn_on_severity: Vec<ViolationSeverity>,
    #[serde(default)]
    pub alert_on_severity: Vec<ViolationSeverity>,
    #[serde(default)]
    pub block_on_nature: Vec<ViolationNature>,
    #[serde(default)]
    pub warn_on_nature: Vec<ViolationNature>,
    pub allow_override: bool,
    pub require_approval: bool,
    pub log_to_console: bool,
    pub log_to_memory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_only: Option<bool>,
}

impl HookConfig {
    pub fn is_report_only(&self) -> bool {
        self.report_only.unwrap_or(false)
    }

    /// Shallow merge: every field present in `patch` replaces the current one.
    pub fn apply(&mut self, patch: HookConfigPatch) {
        if let Some(v) = patch.block_on_severity {
            self.block_on_severity = v;
        }
        if let Some(v) = patch.warn_on_severity {
            self.warn_on_severity = v;
        }
        if let Some(v) = patch.alert_on_severity {
            self.alert_on_severity = v;
        }
        if let Some(v) = patch.block_on_nature {
            self.block_on_nature = v;
        }
        if let Some(v) = patch.warn_on_nature {
            self.warn_on_nature = v;
        }
        if let Some(v) = patch.allow_override {
            self.allow_override = v;
        }
        if let Some(v) = patch.require_approval {
            self.require_approval = v;
        }
        if let Some(v) = patch.log_to_console {
            self.log_to_console = v;
        }
        if let Some(v) = patch.log_to_memory {
            self.log_to_memory = v;
        }
        if patch.validation_interval.is_some() {
            self.validation_interval = patch.validation_interval;
        }
        if patch.report_only.is_some() {
            self.report_only = patch.report_only;
        }
    }
}

/// Partial [`HookConfig`] for `HookRegistry::update_config`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_on_severity: Option<Vec<ViolationSeverity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_on_severity: Option<Vec<ViolationSeverity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_on_severity: Option<Vec<ViolationSeverity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_on_nature: Option<Vec<ViolationNature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_on_nature: Option<Vec<ViolationNature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_override: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_approval: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_to_console: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_to_memory: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementHook {
    pub name: HookName,
    pub enabled: bool,
    pub config: HookConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// What triggered the enforcement run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementContext {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
    pub environment: Environment,
}

impl EnforcementContext {
    pub fn new(operation: impl Into<String>, environment: Environment) -> Self {
        Self {
            operation: operation.into(),
            environment,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementActionType {
    Allow,
    Warn,
    Block,
    Escalate,
    RequireApproval,
    /// Any tag this build does not recognize. Executed as `allow`.
    #[serde(other)]
    Unknown,
}

impl EnforcementActionType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Warn => "warn",
            Self::Block => "block",
            Self::Escalate => "escalate",
            Self::RequireApproval => "require_approval",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EnforcementActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Constitutional boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CsBoundary {
    #[serde(rename = "CS1")]
    Cs1,
    #[serde(rename = "CS2")]
    Cs2,
    #[serde(rename = "CS3")]
    Cs3,
    #[serde(rename = "CS4")]
    Cs4,
    #[serde(rename = "CS5")]
    Cs5,
    #[serde(rename = "CS6")]
    Cs6,
}

impl CsBoundary {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cs1 => "CS1",
            Self::Cs2 => "CS2",
            Self::Cs3 => "CS3",
            Self::Cs4 => "CS4",
            Self::Cs5 => "CS5",
            Self::Cs6 => "CS6",
        }
    }
}

impl std::fmt::Display for CsBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cs_boundary: Option<CsBoundary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_domain: Option<String>,
    pub requires_approval: bool,
    pub override_allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    pub hook_name: HookName,
    pub timestamp: String,
    /// Rule names visited by the decision tree, in order.
    pub decision_path: Vec<String>,
}

/// One decision for one violation within one trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementAction {
    #[serde(rename = "type")]
    pub action_type: EnforcementActionType,
    pub violation: ClassifiedViolation,
    pub reason: String,
    pub governance_context: GovernanceContext,
    pub metadata: ActionMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    pub action_type: EnforcementActionType,
    pub blocked: bool,
    pub escalated: bool,
    pub approval_required: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_steps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_instructions: Option<String>,
}

impl ExecutionResult {
    /// Successful, non-blocking result of `action_type`.
    pub fn passed(action_type: EnforcementActionType, message: impl Into<String>) -> Self {
        Self {
            success: true,
            action_type,
            blocked: false,
            escalated: action_type == EnforcementActionType::Escalate,
            approval_required: action_type == EnforcementActionType::RequireApproval,
            message: message.into(),
            remediation_steps: None,
            override_instructions: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSummary {
    pub allowed: usize,
    pub warned: usize,
    pub blocked: usize,
    pub escalated: usize,
    pub approval_required: usize,
}

impl TriggerSummary {
    pub fn total(&self) -> usize {
        self.allowed + self.warned + self.blocked + self.escalated + self.approval_required
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookTriggerResult {
    pub hook_name: HookName,
    pub triggered: bool,
    pub actions: Vec<EnforcementAction>,
    pub results: Vec<ExecutionResult>,
    pub summary: TriggerSummary,
}

impl HookTriggerResult {
    /// Result for an absent or disabled hook.
    pub fn not_triggered(hook_name: HookName) -> Self {
        Self {
            hook_name,
            triggered: false,
            actions: Vec::new(),
            results: Vec::new(),
            summary: TriggerSummary::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsBoundaryCheck {
    pub violated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cs_boundary: Option<CsBoundary>,
    pub description: String,
    pub requires_approval: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedDomainCheck {
    pub is_protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub paths: Vec<String>,
    pub requires_approval: bool,
}
