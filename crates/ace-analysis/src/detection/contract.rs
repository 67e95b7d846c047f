//! Contract checks between a baseline and a current signature.

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::{json, Map};

use super::types::{now_millis, ContractType, RawViolation, ViolationDetail};
use crate::constraints::{ConstraintCategory, ConstraintDeclaration, ConstraintType};
use crate::signature::{ApiContract, ArchitectureSignature};

/// Run the contract checks selected by each contract constraint.
pub fn detect_contract_violations(
    baseline: &ArchitectureSignature,
    current: &ArchitectureSignature,
    constraints: &[ConstraintDeclaration],
) -> Vec<RawViolation> {
    let mut violations = Vec::new();
    for constraint in constraints
        .iter()
        .filter(|c| c.constraint_type == ConstraintType::Contract)
    {
        if constraint.category == ConstraintCategory::ApiStability || constraint.id.contains("api") {
            violations.extend(detect_api_contract_violations(baseline, current, constraint));
        }
    }
    violations
}

/// Any change to the response schema of an endpoint present in both
/// signatures is breaking. Added and removed endpoints are not reported.
fn detect_api_contract_violations(
    baseline: &ArchitectureSignature,
    current: &ArchitectureSignature,
    constraint: &ConstraintDeclaration,
) -> Vec<RawViolation> {
    let current_apis: FxHashMap<&str, &ApiContract> = current
        .contracts
        .apis
        .iter()
        .map(|api| (api.endpoint.as_str(), api))
        .collect();

    let mut seen = FxHashSet::default();
    let mut violations = Vec::new();
    for old in &baseline.contracts.apis {
        if !seen.insert(old.endpoint.as_str()) {
            continue;
        }
        let Some(new) = current_apis.get(old.endpoint.as_str()) else {
            continue;
        };
        if old.response_schema == new.response_schema {
            continue;
        }

        let mut context = Map::new();
        context.insert("endpoint".to_string(), json!(old.endpoint));
        context.insert("oldResponse".to_string(), old.response_schema.clone());
        context.insert("newResponse".to_string(), new.response_schema.clone());

        violations.push(RawViolation {
            constraint_id: constraint.id.clone(),
            description: format!("Breaking API change detected in {}", old.endpoint),
            location: None,
            context,
            detected_at: now_millis(),
            detail: ViolationDetail::Contract {
                contract_type: ContractType::Api,
                old_version: old.version.clone(),
                new_version: new.version.clone(),
                breaking_change: true,
                migration_required: true,
            },
        });
    }
    violations
}
