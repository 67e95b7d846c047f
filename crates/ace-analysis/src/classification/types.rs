//! Classified violation types.

use serde::{Deserialize, Serialize};

use crate::constraints::{ConstraintCategory, ConstraintSeverity, ConstraintType};
use crate::detection::RawViolation;

/// Violation categories are the constraint categories.
pub type ViolationCategory = ConstraintCategory;

/// Severity ladder, ordered `Info < Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl ViolationSeverity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn all() -> &'static [ViolationSeverity] {
        &[Self::Info, Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    /// One step up the ladder; `Critical` stays `Critical`.
    pub fn elevated(self) -> Self {
        match self {
            Self::Info => Self::Low,
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Critical => Self::Critical,
        }
    }
}

impl From<ConstraintSeverity> for ViolationSeverity {
    fn from(severity: ConstraintSeverity) -> Self {
        match severity {
            ConstraintSeverity::Critical => Self::Critical,
            ConstraintSeverity::High => Self::High,
            ConstraintSeverity::Medium => Self::Medium,
            ConstraintSeverity::Low => Self::Low,
        }
    }
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationNature {
    Structural,
    Contract,
    Governance,
}

impl ViolationNature {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Contract => "contract",
            Self::Governance => "governance",
        }
    }
}

impl From<ConstraintType> for ViolationNature {
    fn from(t: ConstraintType) -> Self {
        match t {
            ConstraintType::Structural => Self::Structural,
            ConstraintType::Contract => Self::Contract,
            ConstraintType::Governance => Self::Governance,
        }
    }
}

impl std::fmt::Display for ViolationNature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw violation plus its classification. Serializes flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedViolation {
    #[serde(flatten)]
    pub violation: RawViolation,
    pub id: String,
    pub severity: ViolationSeverity,
    pub category: ViolationCategory,
    pub nature: ViolationNature,
    pub false_positive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppression_id: Option<String>,
}

impl ClassifiedViolation {
    pub fn constraint_id(&self) -> &str {
        &self.violation.constraint_id
    }

    pub fn description(&self) -> &str {
        &self.violation.description
    }

    pub fn file(&self) -> Option<&str> {
        self.violation.file()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeverityAggregate {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

/// Count per category. Every category is present, zero included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub dependency_direction: usize,
    pub layer_violation: usize,
    pub import_restriction: usize,
    pub module_boundary: usize,
    pub api_stability: usize,
    pub type_stability: usize,
    pub event_schema: usize,
    pub protected_path: usize,
    pub constitutional: usize,
    pub cs_boundary: usize,
    pub governance_integrity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NatureAggregate {
    pub structural: usize,
    pub contract: usize,
    pub governance: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedSummary {
    pub total: usize,
    pub by_severity: SeverityAggregate,
    pub by_category: CategoryAggregate,
    pub by_nature: NatureAggregate,
    pub false_positive_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedViolationReport {
    pub signature_hash: String,
    pub commit: String,
    pub timestamp: String,
    pub violations: Vec<ClassifiedViolation>,
    pub summary: ClassifiedSummary,
}
