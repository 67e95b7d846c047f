//! Governance checks: modules living under protected paths.

use std::collections::BTreeSet;

use aho_corasick::AhoCorasick;
use serde_json::{json, Map};

use super::types::{now_millis, GovernanceType, RawViolation, ViolationDetail, ViolationLocation};
use crate::constraints::{ConstraintCategory, ConstraintDeclaration, ConstraintType};
use crate::signature::ArchitectureSignature;

/// Run the governance checks selected by each governance constraint.
pub fn detect_governance_violations(
    signature: &ArchitectureSignature,
    constraints: &[ConstraintDeclaration],
) -> Vec<RawViolation> {
    let mut violations = Vec::new();
    for constraint in constraints
        .iter()
        .filter(|c| c.constraint_type == ConstraintType::Governance)
    {
        if constraint.category == ConstraintCategory::ProtectedPath || constraint.id.contains("protected") {
            violations.extend(detect_protected_path_violations(signature, constraint));
        }
    }
    violations
}

/// One violation per (module, protected path) where the module path
/// contains the protected path. Protected paths come from the constraint's
/// `metadata.protectedPaths`, else from the signature's governance section.
fn detect_protected_path_violations(
    signature: &ArchitectureSignature,
    constraint: &ConstraintDeclaration,
) -> Vec<RawViolation> {
    let protected_paths: Vec<String> = constraint
        .metadata_strings("protectedPaths")
        .unwrap_or_else(|| signature.governance.protected_paths.clone())
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    if protected_paths.is_empty() {
        return Vec::new();
    }

    let matcher = AhoCorasick::new(&protected_paths).ok();

    let mut violations = Vec::new();
    for module in &signature.structure.modules {
        let hits: BTreeSet<usize> = match &matcher {
            Some(ac) => ac
                .find_overlapping_iter(module.path.as_str())
                .map(|m| m.pattern().as_usize())
                .collect(),
            None => protected_paths
                .iter()
                .enumerate()
                .filter(|(_, p)| module.path.contains(p.as_str()))
                .map(|(i, _)| i)
                .collect(),
        };

        for index in hits {
            let protected_path = &protected_paths[index];
            let mut context = Map::new();
            context.insert("protectedPath".to_string(), json!(protected_path));
            context.insert("moduleHash".to_string(), json!(module.hash));

            violations.push(RawViolation {
                constraint_id: constraint.id.clone(),
                description: format!("Protected file modified: {}", module.path),
                location: Some(ViolationLocation {
                    file: Some(module.path.clone()),
                    module: Some(module.name.clone()),
                    ..Default::default()
                }),
                context,
                detected_at: now_millis(),
                detail: ViolationDetail::Governance {
                    governance_type: GovernanceType::ProtectedPath,
                    protected_file: Some(module.path.clone()),
                    cs_boundary: None,
                },
            });
        }
    }
    violations
}
