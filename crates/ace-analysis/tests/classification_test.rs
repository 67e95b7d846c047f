//! Classification: severity elevation, unknown constraints, aggregates.

use ace_analysis::classification::*;
use ace_analysis::constraints::{builtin_constraints, ConstraintDeclaration, ConstraintSeverity};
use ace_analysis::detection::*;
use serde_json::Map;

fn structural(constraint_id: &str) -> RawViolation {
    RawViolation {
        constraint_id: constraint_id.to_string(),
        description: "Circular dependency detected: a → b → a".to_string(),
        location: None,
        context: Map::new(),
        detected_at: now_millis(),
        detail: ViolationDetail::Structural {
            structural_type: StructuralType::CircularDependency,
            affected_modules: vec!["a".into(), "b".into(), "a".into()],
            dependency_chain: None,
        },
    }
}

fn governance(constraint_id: &str, file: &str) -> RawViolation {
    RawViolation {
        constraint_id: constraint_id.to_string(),
        description: format!("Protected file modified: {file}"),
        location: Some(ViolationLocation {
            file: Some(file.to_string()),
            ..Default::default()
        }),
        context: Map::new(),
        detected_at: now_millis(),
        detail: ViolationDetail::Governance {
            governance_type: GovernanceType::ProtectedPath,
            protected_file: Some(file.to_string()),
            cs_boundary: None,
        },
    }
}

fn constraint(id: &str) -> ConstraintDeclaration {
    builtin_constraints().into_iter().find(|c| c.id == id).unwrap()
}

fn report(violations: Vec<RawViolation>) -> ViolationReport {
    let summary = ViolationSummary {
        total: violations.len(),
        by_type: TypeCounts::default(),
    };
    ViolationReport {
        signature_hash: "h".repeat(64),
        commit: "abc".to_string(),
        timestamp: now_millis(),
        violations,
        summary,
    }
}

#[test]
fn structural_severity_is_copied() {
    let c = constraint("structural.layer-boundaries");
    let v = classify_violation(&structural(&c.id), &c);
    assert_eq!(v.severity, ViolationSeverity::High);
    assert_eq!(v.category, ViolationCategory::LayerViolation);
    assert_eq!(v.nature, ViolationNature::Structural);
    assert!(!v.false_positive);
    assert!(v.id.starts_with("structural.layer-boundaries-"));
}

#[test]
fn governance_severity_is_elevated_one_step() {
    let mut c = constraint("governance.protected-paths");
    c.severity = ConstraintSeverity::Medium;
    let v = classify_violation(&governance(&c.id, "foreman/governance/x.md"), &c);
    assert_eq!(v.severity, ViolationSeverity::High);
    assert_eq!(v.nature, ViolationNature::Governance);
}

#[test]
fn critical_governance_stays_critical() {
    let c = constraint("governance.protected-paths");
    let v = classify_violation(&governance(&c.id, "BUILD_PHILOSOPHY.md"), &c);
    assert_eq!(v.severity, ViolationSeverity::Critical);
}

#[test]
fn ids_are_unique_per_classification() {
    let c = constraint("structural.no-circular-deps");
    let a = classify_violation(&structural(&c.id), &c);
    let b = classify_violation(&structural(&c.id), &c);
    assert_ne!(a.id, b.id);
}

#[test]
fn unknown_constraint_gets_default_classification() {
    let classified = classify_violation_report(&report(vec![structural("custom.unregistered")]), &builtin_constraints());
    let v = &classified.violations[0];
    assert!(v.id.starts_with("unknown-"));
    assert_eq!(v.severity, ViolationSeverity::Medium);
    assert_eq!(v.category, ViolationCategory::ModuleBoundary);
    assert_eq!(v.nature, ViolationNature::Structural);
    assert!(!v.false_positive);
}

#[test]
fn report_aggregates_every_bucket() {
    let raw = report(vec![
        structural("structural.no-circular-deps"),
        structural("structural.layer-boundaries"),
        governance("governance.protected-paths", "foreman/governance/x.md"),
    ]);
    let classified = classify_violation_report(&raw, &builtin_constraints());

    assert_eq!(classified.signature_hash, raw.signature_hash);
    assert_eq!(classified.commit, "abc");
    let s = &classified.summary;
    assert_eq!(s.total, 3);
    assert_eq!(s.by_severity.critical, 2);
    assert_eq!(s.by_severity.high, 1);
    assert_eq!(s.by_severity.info, 0);
    assert_eq!(s.by_category.dependency_direction, 1);
    assert_eq!(s.by_category.layer_violation, 1);
    assert_eq!(s.by_category.protected_path, 1);
    assert_eq!(s.by_category.cs_boundary, 0);
    assert_eq!(s.by_nature.structural, 2);
    assert_eq!(s.by_nature.governance, 1);
    assert_eq!(s.false_positive_count, 0);

    let json = serde_json::to_value(s).unwrap();
    assert_eq!(json["byCategory"].as_object().unwrap().len(), 11);
    assert_eq!(json["bySeverity"].as_object().unwrap().len(), 5);
}

#[test]
fn false_positives_are_info_severity() {
    let c = constraint("structural.no-circular-deps");
    let mut v = classify_violation(&structural(&c.id), &c);
    v.severity = ViolationSeverity::Info;
    v.false_positive = true;
    let real = classify_violation(&structural(&c.id), &c);
    let all = vec![v.clone(), real];
    let fps = identify_false_positives(&all);
    assert_eq!(fps.len(), 1);
    assert_eq!(fps[0].id, v.id);
}

#[test]
fn classified_violation_serializes_flat() {
    let c = constraint("structural.no-circular-deps");
    let v = classify_violation(&structural(&c.id), &c);
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["constraintId"], "structural.no-circular-deps");
    assert_eq!(json["type"], "structural");
    assert_eq!(json["severity"], "critical");
    assert_eq!(json["category"], "dependency_direction");
    assert_eq!(json["falsePositive"], false);
    assert!(json.get("violation").is_none());
}
