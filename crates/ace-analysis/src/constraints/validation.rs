//! Structural validation of constraint declarations in raw JSON form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const REQUIRED_FIELDS: &[&str] = &[
    "id", "version", "type", "category", "rule", "scope", "severity", "owner", "source",
    "examples", "metadata", "createdAt", "updatedAt",
];

const VALID_TYPES: &[&str] = &["structural", "contract", "governance"];
const VALID_SEVERITIES: &[&str] = &["critical", "high", "medium", "low"];

static SEMVER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").ok());
static ISO8601_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T").ok());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validate a declaration before it is typed. Collects every problem rather
/// than stopping at the first.
pub fn validate_constraint(constraint: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    let Some(obj) = constraint.as_object() else {
        return ValidationResult {
            valid: false,
            errors: vec!["Constraint must be a JSON object".to_string()],
        };
    };

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(*field) {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    if let Some(t) = obj.get("type").filter(|v| truthy(v)) {
        if !t.as_str().is_some_and(|s| VALID_TYPES.contains(&s)) {
            errors.push("Invalid constraint type".to_string());
        }
    }

    if let Some(s) = obj.get("severity").filter(|v| truthy(v)) {
        if !s.as_str().is_some_and(|s| VALID_SEVERITIES.contains(&s)) {
            errors.push("Invalid constraint severity".to_string());
        }
    }

    if let Some(v) = obj.get("version").filter(|v| truthy(v)) {
        if !v.as_str().is_some_and(is_semver) {
            errors.push("Invalid version format (expected semver)".to_string());
        }
    }

    if let Some(examples) = obj.get("examples").filter(|v| truthy(v)) {
        if !examples.get("valid").is_some_and(Value::is_array) {
            errors.push("Invalid examples.valid (expected array)".to_string());
        }
        if !examples.get("invalid").is_some_and(Value::is_array) {
            errors.push("Invalid examples.invalid (expected array)".to_string());
        }
    }

    for (field, label) in [("createdAt", "createdAt"), ("updatedAt", "updatedAt")] {
        if let Some(ts) = obj.get(field).filter(|v| truthy(v)) {
            if !ts.as_str().is_some_and(is_iso8601) {
                errors.push(format!("Invalid {label} timestamp (expected ISO 8601)"));
            }
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

/// Simplified semver: `X.Y.Z` only, no pre-release or build metadata.
pub fn is_semver(version: &str) -> bool {
    SEMVER_RE.as_ref().is_some_and(|re| re.is_match(version))
}

/// Accepts anything starting with `YYYY-MM-DDT`.
pub fn is_iso8601(timestamp: &str) -> bool {
    ISO8601_RE.as_ref().is_some_and(|re| re.is_match(timestamp))
}

/// Empty strings, null, false, and zero are treated as absent for value checks.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
