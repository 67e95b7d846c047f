//! Read-only constraint registry contract and its in-memory implementation.

use std::path::Path;

use ace_core::errors::RegistryError;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::types::*;
use super::validation::validate_constraint;

/// Conjunctive filter; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ConstraintFilter {
    pub constraint_type: Option<ConstraintType>,
    pub severity: Option<ConstraintSeverity>,
    pub category: Option<ConstraintCategory>,
    pub scope: Option<ConstraintScope>,
    pub owner: Option<String>,
}

impl ConstraintFilter {
    pub fn matches(&self, c: &ConstraintDeclaration) -> bool {
        self.constraint_type.map_or(true, |t| c.constraint_type == t)
            && self.severity.map_or(true, |s| c.severity == s)
            && self.category.map_or(true, |cat| c.category == cat)
            && self.scope.as_ref().map_or(true, |s| &c.scope == s)
            && self.owner.as_ref().map_or(true, |o| &c.owner == o)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintQueryResult {
    pub constraints: Vec<ConstraintDeclaration>,
    /// Size of the registry before filtering.
    pub total: usize,
    /// Number of constraints that matched.
    pub filtered: usize,
}

/// Source of constraint declarations. Every call returns a snapshot.
pub trait ConstraintRegistry: Send + Sync {
    fn all(&self) -> Vec<ConstraintDeclaration>;

    fn get(&self, id: &str) -> Option<ConstraintDeclaration> {
        self.all().into_iter().find(|c| c.id == id)
    }

    fn query(&self, filter: &ConstraintFilter) -> ConstraintQueryResult {
        let all = self.all();
        let total = all.len();
        let constraints: Vec<ConstraintDeclaration> =
            all.into_iter().filter(|c| filter.matches(c)).collect();
        ConstraintQueryResult {
            filtered: constraints.len(),
            constraints,
            total,
        }
    }

    /// Sorted constraint ids, as embedded in signatures.
    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.all().into_iter().map(|c| c.id).collect();
        ids.sort();
        ids
    }
}

/// Registry backed by a validated, immutable list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConstraintRegistry {
    constraints: Vec<ConstraintDeclaration>,
}

impl InMemoryConstraintRegistry {
    /// Build from typed declarations. Each is re-validated and ids must be unique.
    pub fn from_declarations(declarations: Vec<ConstraintDeclaration>) -> Result<Self, RegistryError> {
        let mut seen = FxHashSet::default();
        for decl in &declarations {
            let raw = serde_json::to_value(decl).map_err(|e| RegistryError::Parse {
                path: decl.id.clone(),
                message: e.to_string(),
            })?;
            let result = validate_constraint(&raw);
            if !result.valid {
                return Err(RegistryError::InvalidDeclaration {
                    id: decl.id.clone(),
                    errors: result.errors,
                });
            }
            if !seen.insert(decl.id.clone()) {
                return Err(RegistryError::DuplicateId(decl.id.clone()));
            }
        }
        Ok(Self {
            constraints: declarations,
        })
    }

    /// Parse a JSON array of declarations, validating the raw form first so
    /// the error lists every problem instead of the first serde failure.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, RegistryError> {
        let raw: Value = serde_json::from_str(json).map_err(|e| RegistryError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        let items = raw.as_array().ok_or_else(|| RegistryError::Parse {
            path: origin.to_string(),
            message: "expected a JSON array of constraint declarations".to_string(),
        })?;

        let mut declarations = Vec::with_capacity(items.len());
        for item in items {
            let id = item
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<missing id>")
                .to_string();
            let result = validate_constraint(item);
            if !result.valid {
                return Err(RegistryError::InvalidDeclaration { id, errors: result.errors });
            }
            let decl: ConstraintDeclaration =
                serde_json::from_value(item.clone()).map_err(|e| RegistryError::InvalidDeclaration {
                    id,
                    errors: vec![e.to_string()],
                })?;
            declarations.push(decl);
        }
        Self::from_declarations(declarations)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content, &path.display().to_string())
    }

    /// Registry holding [`builtin_constraints`].
    pub fn builtin() -> Self {
        Self {
            constraints: builtin_constraints(),
        }
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl ConstraintRegistry for InMemoryConstraintRegistry {
    fn all(&self) -> Vec<ConstraintDeclaration> {
        self.constraints.clone()
    }

    fn get(&self, id: &str) -> Option<ConstraintDeclaration> {
        self.constraints.iter().find(|c| c.id == id).cloned()
    }
}

const BUILTIN_TIMESTAMP: &str = "2025-01-01T00:00:00Z";

fn builtin(
    id: &str,
    constraint_type: ConstraintType,
    category: ConstraintCategory,
    severity: ConstraintSeverity,
    rule: &str,
    examples: ConstraintExamples,
    metadata: Map<String, Value>,
) -> ConstraintDeclaration {
    ConstraintDeclaration {
        id: id.to_string(),
        version: "1.0.0".to_string(),
        constraint_type,
        category,
        rule: rule.to_string(),
        scope: ConstraintScope::Global,
        severity,
        owner: "architecture".to_string(),
        source: "builtin".to_string(),
        examples,
        metadata,
        created_at: BUILTIN_TIMESTAMP.to_string(),
        updated_at: BUILTIN_TIMESTAMP.to_string(),
    }
}

fn examples(valid: &[&str], invalid: &[&str]) -> ConstraintExamples {
    ConstraintExamples {
        valid: valid.iter().map(|s| s.to_string()).collect(),
        invalid: invalid.iter().map(|s| s.to_string()).collect(),
    }
}

/// The default constraint set: no cycles, layer boundaries, API stability,
/// protected paths.
pub fn builtin_constraints() -> Vec<ConstraintDeclaration> {
    let mut protected = Map::new();
    protected.insert(
        "rationale".to_string(),
        json!("Governance artifacts change only through the approval workflow"),
    );

    vec![
        builtin(
            "structural.no-circular-deps",
            ConstraintType::Structural,
            ConstraintCategory::DependencyDirection,
            ConstraintSeverity::Critical,
            "Modules must not form import cycles",
            examples(&["a imports b; b imports c"], &["a imports b; b imports a"]),
            Map::new(),
        ),
        builtin(
            "structural.layer-boundaries",
            ConstraintType::Structural,
            ConstraintCategory::LayerViolation,
            ConstraintSeverity::High,
            "A layer may depend only on the layers it declares as allowed",
            examples(&["api imports library"], &["library imports api"]),
            Map::new(),
        ),
        builtin(
            "contract.api-stability",
            ConstraintType::Contract,
            ConstraintCategory::ApiStability,
            ConstraintSeverity::High,
            "Response schemas of existing endpoints must not change",
            examples(&["add a new endpoint"], &["rename a response field"]),
            Map::new(),
        ),
        builtin(
            "governance.protected-paths",
            ConstraintType::Governance,
            ConstraintCategory::ProtectedPath,
            ConstraintSeverity::Critical,
            "Protected governance files must not be modified",
            examples(&["edit lib/utils/date.ts"], &["edit foreman/constitution/cs1.md"]),
            protected,
        ),
    ]
}
