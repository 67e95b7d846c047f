//! Constraint declaration types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which detector family checks a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    Structural,
    Contract,
    Governance,
}

impl ConstraintType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Contract => "contract",
            Self::Governance => "governance",
        }
    }

    pub fn all() -> &'static [ConstraintType] {
        &[Self::Structural, Self::Contract, Self::Governance]
    }
}

impl std::fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared severity. `info` exists only on classified violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ConstraintSeverity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for ConstraintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The 11 constraint categories. Violations inherit their constraint's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintCategory {
    DependencyDirection,
    LayerViolation,
    ImportRestriction,
    ModuleBoundary,
    ApiStability,
    TypeStability,
    EventSchema,
    ProtectedPath,
    Constitutional,
    CsBoundary,
    GovernanceIntegrity,
}

impl ConstraintCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DependencyDirection => "dependency_direction",
            Self::LayerViolation => "layer_violation",
            Self::ImportRestriction => "import_restriction",
            Self::ModuleBoundary => "module_boundary",
            Self::ApiStability => "api_stability",
            Self::TypeStability => "type_stability",
            Self::EventSchema => "event_schema",
            Self::ProtectedPath => "protected_path",
            Self::Constitutional => "constitutional",
            Self::CsBoundary => "cs_boundary",
            Self::GovernanceIntegrity => "governance_integrity",
        }
    }

    pub fn all() -> &'static [ConstraintCategory] {
        &[
            Self::DependencyDirection, Self::LayerViolation, Self::ImportRestriction,
            Self::ModuleBoundary, Self::ApiStability, Self::TypeStability, Self::EventSchema,
            Self::ProtectedPath, Self::Constitutional, Self::CsBoundary, Self::GovernanceIntegrity,
        ]
    }
}

impl std::fmt::Display for ConstraintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `global`, `module:<name>`, `layer:<name>`, or `path:<prefix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConstraintScope {
    Global,
    Module(String),
    Layer(String),
    Path(String),
}

impl TryFrom<String> for ConstraintScope {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "global" {
            return Ok(Self::Global);
        }
        match value.split_once(':') {
            Some(("module", rest)) if !rest.is_empty() => Ok(Self::Module(rest.to_string())),
            Some(("layer", rest)) if !rest.is_empty() => Ok(Self::Layer(rest.to_string())),
            Some(("path", rest)) if !rest.is_empty() => Ok(Self::Path(rest.to_string())),
            _ => Err(format!("invalid constraint scope: {value}")),
        }
    }
}

impl From<ConstraintScope> for String {
    fn from(scope: ConstraintScope) -> Self {
        scope.to_string()
    }
}

impl std::fmt::Display for ConstraintScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Module(m) => write!(f, "module:{m}"),
            Self::Layer(l) => write!(f, "layer:{l}"),
            Self::Path(p) => write!(f, "path:{p}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstraintExamples {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// A declared architectural rule. Immutable; identified by `id` + `version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintDeclaration {
    pub id: String,
    pub version: String,
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    pub category: ConstraintCategory,
    pub rule: String,
    pub scope: ConstraintScope,
    pub severity: ConstraintSeverity,
    pub owner: String,
    pub source: String,
    pub examples: ConstraintExamples,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl ConstraintDeclaration {
    /// A metadata entry read as a list of strings; non-string items are skipped.
    pub fn metadata_strings(&self, key: &str) -> Option<Vec<String>> {
        self.metadata.get(key)?.as_array().map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_parses_and_prints() {
        for raw in ["global", "module:signature-engine", "layer:api", "path:lib/foreman/"] {
            let scope = ConstraintScope::try_from(raw.to_string()).unwrap();
            assert_eq!(scope.to_string(), raw);
        }
        assert!(ConstraintScope::try_from("module:".to_string()).is_err());
        assert!(ConstraintScope::try_from("everywhere".to_string()).is_err());
    }

    #[test]
    fn eleven_categories() {
        assert_eq!(ConstraintCategory::all().len(), 11);
        let json = serde_json::to_string(&ConstraintCategory::CsBoundary).unwrap();
        assert_eq!(json, "\"cs_boundary\"");
    }
}
