//! Telemetry events, query filters and learning-loop classifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classification::{ClassifiedViolation, ViolationCategory, ViolationNature, ViolationSeverity};
use crate::enforcement::{EnforcementActionType, GovernanceContext, HookName};

/// Signature the violation was detected against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRef {
    pub commit: String,
    pub branch: String,
    pub signature_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionMetadata {
    pub detection_method: String,
    pub false_positive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppression_id: Option<String>,
}

/// One classified violation, as recorded by the memory fabric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationEvent {
    pub event_id: String,
    pub timestamp: String,
    pub version: String,
    pub violation: ClassifiedViolation,
    pub signature: SignatureRef,
    pub metadata: DetectionMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementRecord {
    pub hook_name: HookName,
    pub action_type: EnforcementActionType,
    pub violation: ClassifiedViolation,
    pub reason: String,
    pub governance_context: GovernanceContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSnapshot {
    pub blocked: bool,
    pub escalated: bool,
    pub approval_required: bool,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explainability {
    pub decision_path: Vec<String>,
    pub rules: Vec<String>,
    pub overridden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_reason: Option<String>,
}

/// One enforcement decision and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementEvent {
    pub event_id: String,
    pub timestamp: String,
    pub version: String,
    pub enforcement: EnforcementRecord,
    pub result: ResultSnapshot,
    pub explainability: Explainability,
}

/// Violation query. Unset fields match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationQueryFilters {
    pub severity: Option<ViolationSeverity>,
    pub category: Option<ViolationCategory>,
    pub nature: Option<ViolationNature>,
    pub constraint_id: Option<String>,
    /// Inclusive lower bound on the event timestamp (RFC 3339).
    pub since: Option<String>,
    /// Inclusive upper bound on the event timestamp (RFC 3339).
    pub until: Option<String>,
    #[serde(default)]
    pub false_positives_only: bool,
}

impl ViolationQueryFilters {
    pub fn matches(&self, event: &ViolationEvent) -> bool {
        let v = &event.violation;
        self.severity.map_or(true, |s| v.severity == s)
            && self.category.map_or(true, |c| v.category == c)
            && self.nature.map_or(true, |n| v.nature == n)
            && self.constraint_id.as_deref().map_or(true, |id| v.constraint_id() == id)
            && within(&event.timestamp, self.since.as_deref(), self.until.as_deref())
            && (!self.false_positives_only || v.false_positive)
    }
}

/// Enforcement query. Unset fields match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementQueryFilters {
    pub hook_name: Option<HookName>,
    pub action_type: Option<EnforcementActionType>,
    pub blocked: Option<bool>,
    pub escalated: Option<bool>,
    pub since: Option<String>,
    pub until: Option<String>,
}

impl EnforcementQueryFilters {
    pub fn matches(&self, event: &EnforcementEvent) -> bool {
        self.hook_name.map_or(true, |h| event.enforcement.hook_name == h)
            && self.action_type.map_or(true, |a| event.enforcement.action_type == a)
            && self.blocked.map_or(true, |b| event.result.blocked == b)
            && self.escalated.map_or(true, |e| event.result.escalated == e)
            && within(&event.timestamp, self.since.as_deref(), self.until.as_deref())
    }
}

/// Inclusive RFC 3339 range check on parsed instants, so bounds may use any
/// precision or offset. An unparseable bound or event timestamp matches nothing.
fn within(timestamp: &str, since: Option<&str>, until: Option<&str>) -> bool {
    if since.is_none() && until.is_none() {
        return true;
    }
    let Some(at) = parse_instant(timestamp, "event timestamp") else {
        return false;
    };
    let after_since = match since {
        Some(s) => parse_instant(s, "since").is_some_and(|s| at >= s),
        None => true,
    };
    let before_until = match until {
        Some(u) => parse_instant(u, "until").is_some_and(|u| at <= u),
        None => true,
    };
    after_since && before_until
}

fn parse_instant(raw: &str, field: &'static str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(e) => {
            warn!(field, value = raw, error = %e, "unparseable timestamp in telemetry query, matching nothing");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlCategory {
    ArchitectureGap,
    QaGap,
    ImplementationGap,
    TypeSafetyGap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiAction {
    UpdateArchitecture,
    AddTest,
    FixCode,
    AddTypeValidation,
}

impl CiAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateArchitecture => "update_architecture",
            Self::AddTest => "add_test",
            Self::FixCode => "fix_code",
            Self::AddTypeValidation => "add_type_validation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlciPriority {
    Immediate,
    High,
    Medium,
    Low,
}

/// Failure-learning classification of one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlciClassification {
    pub violation_id: String,
    pub fl_category: FlCategory,
    pub ci_action: CiAction,
    pub priority: FlciPriority,
    pub learning_suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementFlCategory {
    EnforcementSuccess,
    EnforcementBlocked,
    EnforcementEscalated,
    EnforcementOverridden,
}

impl EnforcementFlCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EnforcementSuccess => "enforcement_success",
            Self::EnforcementBlocked => "enforcement_blocked",
            Self::EnforcementEscalated => "enforcement_escalated",
            Self::EnforcementOverridden => "enforcement_overridden",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementCiAction {
    StrengthenRule,
    RefineDetection,
    UpdateSeverity,
    AddEscapeHatch,
}

/// Failure-learning classification of one enforcement outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlciEnforcementClassification {
    pub enforcement_id: String,
    pub fl_category: EnforcementFlCategory,
    pub ci_action: EnforcementCiAction,
    pub learning_suggestion: String,
}

/// Proposed governance-document change prompted by a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSuggestion {
    pub violation_id: String,
    pub suggestion: String,
    pub target_document: String,
    pub proposed_change: String,
    pub reasoning: String,
}
