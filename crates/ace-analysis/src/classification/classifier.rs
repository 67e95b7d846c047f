//! Classification rules.

use rustc_hash::FxHashMap;
use uuid::Uuid;

use super::aggregate::{aggregate_by_category, aggregate_by_nature, aggregate_by_severity};
use super::types::*;
use crate::constraints::{ConstraintCategory, ConstraintDeclaration, ConstraintType};
use crate::detection::{RawViolation, ViolationReport};

/// Classify one violation against its constraint.
///
/// Severity is the constraint's, raised one step for governance violations.
/// Category is copied from the constraint and nature follows the violation
/// type. Only `info` severity is flagged as a likely false positive.
pub fn classify_violation(violation: &RawViolation, constraint: &ConstraintDeclaration) -> ClassifiedViolation {
    let violation_type = violation.violation_type();
    let mut severity = ViolationSeverity::from(constraint.severity);
    if violation_type == ConstraintType::Governance {
        severity = severity.elevated();
    }

    ClassifiedViolation {
        violation: violation.clone(),
        id: format!("{}-{}", constraint.id, Uuid::new_v4()),
        severity,
        category: constraint.category,
        nature: ViolationNature::from(violation_type),
        false_positive: severity == ViolationSeverity::Info,
        suppression_id: None,
    }
}

/// Fallback for violations whose constraint id is not among `constraints`.
fn classify_unknown(violation: &RawViolation) -> ClassifiedViolation {
    ClassifiedViolation {
        violation: violation.clone(),
        id: format!("unknown-{}", Uuid::new_v4()),
        severity: ViolationSeverity::Medium,
        category: ConstraintCategory::ModuleBoundary,
        nature: ViolationNature::from(violation.violation_type()),
        false_positive: false,
        suppression_id: None,
    }
}

/// Classify every violation in a report and aggregate the results.
pub fn classify_violation_report(
    report: &ViolationReport,
    constraints: &[ConstraintDeclaration],
) -> ClassifiedViolationReport {
    let by_id: FxHashMap<&str, &ConstraintDeclaration> =
        constraints.iter().map(|c| (c.id.as_str(), c)).collect();

    let violations: Vec<ClassifiedViolation> = report
        .violations
        .iter()
        .map(|v| match by_id.get(v.constraint_id.as_str()) {
            Some(constraint) => classify_violation(v, constraint),
            None => {
                tracing::debug!(constraint_id = %v.constraint_id, "unknown constraint, default classification");
                classify_unknown(v)
            }
        })
        .collect();

    let summary = ClassifiedSummary {
        total: violations.len(),
        by_severity: aggregate_by_severity(&violations),
        by_category: aggregate_by_category(&violations),
        by_nature: aggregate_by_nature(&violations),
        false_positive_count: violations.iter().filter(|v| v.false_positive).count(),
    };

    ClassifiedViolationReport {
        signature_hash: report.signature_hash.clone(),
        commit: report.commit.clone(),
        timestamp: report.timestamp.clone(),
        violations,
        summary,
    }
}
