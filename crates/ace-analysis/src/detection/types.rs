//! Raw violation and report types.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constraints::ConstraintType;
use crate::signature::ArchitectureSignature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralType {
    CircularDependency,
    LayerViolation,
    ImportRestriction,
    ModuleBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    Api,
    Type,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceType {
    ProtectedPath,
    Constitutional,
    CsBoundary,
    Integrity,
}

/// Where a violation was observed. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViolationLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

/// Typed detail, discriminated by the `type` tag on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ViolationDetail {
    Structural {
        structural_type: StructuralType,
        affected_modules: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dependency_chain: Option<Vec<String>>,
    },
    Contract {
        contract_type: ContractType,
        old_version: String,
        new_version: String,
        breaking_change: bool,
        migration_required: bool,
    },
    Governance {
        governance_type: GovernanceType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        protected_file: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cs_boundary: Option<String>,
    },
}

/// An unclassified constraint breach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawViolation {
    pub constraint_id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ViolationLocation>,
    #[serde(default)]
    pub context: Map<String, Value>,
    pub detected_at: String,
    #[serde(flatten)]
    pub detail: ViolationDetail,
}

impl RawViolation {
    pub fn violation_type(&self) -> ConstraintType {
        match self.detail {
            ViolationDetail::Structural { .. } => ConstraintType::Structural,
            ViolationDetail::Contract { .. } => ConstraintType::Contract,
            ViolationDetail::Governance { .. } => ConstraintType::Governance,
        }
    }

    /// `location.file`, if any.
    pub fn file(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.file.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeCounts {
    pub structural: usize,
    pub contract: usize,
    pub governance: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationSummary {
    pub total: usize,
    pub by_type: TypeCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationReport {
    pub signature_hash: String,
    pub commit: String,
    pub timestamp: String,
    pub violations: Vec<RawViolation>,
    pub summary: ViolationSummary,
}

impl ViolationReport {
    /// Zero-count report for `signature`.
    pub fn empty(signature: &ArchitectureSignature) -> Self {
        Self::from_violations(signature, Vec::new())
    }

    /// Report over `violations` with the summary computed from them.
    pub fn from_violations(signature: &ArchitectureSignature, violations: Vec<RawViolation>) -> Self {
        let mut by_type = TypeCounts::default();
        for v in &violations {
            match v.violation_type() {
                ConstraintType::Structural => by_type.structural += 1,
                ConstraintType::Contract => by_type.contract += 1,
                ConstraintType::Governance => by_type.governance += 1,
            }
        }
        Self {
            signature_hash: signature.hash.clone(),
            commit: signature.repository.commit.clone(),
            timestamp: now_millis(),
            summary: ViolationSummary {
                total: violations.len(),
                by_type,
            },
            violations,
        }
    }
}

/// Current UTC time with millisecond precision.
pub fn now_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
