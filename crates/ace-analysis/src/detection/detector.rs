//! Detection entry points. Fail-soft: a panicking check yields an empty report.

use std::panic::{catch_unwind, AssertUnwindSafe};

use ace_core::errors::{AceErrorCode, DetectionError};

use super::contract::detect_contract_violations;
use super::governance::detect_governance_violations;
use super::structural::detect_structural_violations;
use super::types::{RawViolation, ViolationReport};
use crate::constraints::{ConstraintDeclaration, ConstraintType};
use crate::signature::ArchitectureSignature;

/// Detect structural and governance violations in `signature`.
/// Contract checks need a baseline; see [`detect_violations_with_baseline`].
pub fn detect_violations(
    signature: &ArchitectureSignature,
    constraints: &[ConstraintDeclaration],
) -> ViolationReport {
    run(signature, None, constraints)
}

/// Detect all violation types, diffing contracts against `baseline`.
pub fn detect_violations_with_baseline(
    baseline: &ArchitectureSignature,
    signature: &ArchitectureSignature,
    constraints: &[ConstraintDeclaration],
) -> ViolationReport {
    run(signature, Some(baseline), constraints)
}

/// Detect using only the constraints of one type.
pub fn detect_violations_by_type(
    signature: &ArchitectureSignature,
    constraint_type: ConstraintType,
    constraints: &[ConstraintDeclaration],
) -> ViolationReport {
    let filtered: Vec<ConstraintDeclaration> = constraints
        .iter()
        .filter(|c| c.constraint_type == constraint_type)
        .cloned()
        .collect();
    detect_violations(signature, &filtered)
}

fn run(
    signature: &ArchitectureSignature,
    baseline: Option<&ArchitectureSignature>,
    constraints: &[ConstraintDeclaration],
) -> ViolationReport {
    // The three checks only read their inputs.
    guarded(signature, || {
        let (structural, (contract, governance)) = rayon::join(
            || detect_structural_violations(signature, constraints),
            || {
                rayon::join(
                    || {
                        baseline
                            .map(|b| detect_contract_violations(b, signature, constraints))
                            .unwrap_or_default()
                    },
                    || detect_governance_violations(signature, constraints),
                )
            },
        );
        let mut violations = structural;
        violations.extend(contract);
        violations.extend(governance);
        violations
    })
}

/// Run `checks`, turning a panic into an empty report for `signature`.
fn guarded<F>(signature: &ArchitectureSignature, checks: F) -> ViolationReport
where
    F: FnOnce() -> Vec<RawViolation>,
{
    match catch_unwind(AssertUnwindSafe(checks)) {
        Ok(violations) => {
            let report = ViolationReport::from_violations(signature, violations);
            tracing::info!(
                signature_hash = %report.signature_hash,
                total = report.summary.total,
                structural = report.summary.by_type.structural,
                contract = report.summary.by_type.contract,
                governance = report.summary.by_type.governance,
                "violation detection complete"
            );
            report
        }
        Err(panic) => {
            let err = DetectionError::DetectorPanic {
                check: "violation detection".to_string(),
                message: panic_message(panic.as_ref()),
            };
            tracing::error!(error = %err.coded_string(), "detection failed, returning empty report");
            ViolationReport::empty(signature)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{SignatureEngine, SignatureOptions};

    fn empty_signature() -> ArchitectureSignature {
        let dir = std::env::temp_dir().join("ace-detector-missing-root");
        SignatureEngine::default().generate(&dir, &SignatureOptions::default())
    }

    #[test]
    fn panicking_check_yields_empty_report() {
        let signature = empty_signature();
        let report = guarded(&signature, || panic!("layer map corrupted"));
        assert_eq!(report.summary.total, 0);
        assert!(report.violations.is_empty());
        assert_eq!(report.signature_hash, signature.hash);
    }

    #[test]
    fn panic_payloads_are_rendered() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42u8), "unknown panic");
    }
}
