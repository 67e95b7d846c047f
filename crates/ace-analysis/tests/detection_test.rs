//! Detection over hand-built signatures: cycles, layers, contracts, protected paths.

use ace_analysis::constraints::{builtin_constraints, ConstraintType};
use ace_analysis::detection::*;
use ace_analysis::hashing::sha256_hex;
use ace_analysis::signature::graph::build_dependency_graph;
use ace_analysis::signature::layers::{define_layers, determine_layer};
use ace_analysis::signature::*;
use serde_json::json;

fn module(path: &str, imports: &[&str]) -> ModuleSignature {
    let name = path.rsplit('/').next().unwrap().trim_end_matches(".ts").to_string();
    ModuleSignature {
        name,
        path: path.to_string(),
        exports: vec![],
        imports: imports.iter().map(|s| s.to_string()).collect(),
        layer: determine_layer(path).to_string(),
        hash: sha256_hex(path.as_bytes()),
    }
}

fn signature(modules: Vec<ModuleSignature>) -> ArchitectureSignature {
    let dependency_graph = build_dependency_graph(&modules);
    let layers = define_layers(&modules);
    let mut sig = ArchitectureSignature {
        version: "1.0.0".to_string(),
        timestamp: "2026-01-01T00:00:00Z".to_string(),
        repository: RepositoryInfo {
            url: String::new(),
            commit: "abc123".to_string(),
            branch: "main".to_string(),
        },
        structure: StructureSection {
            modules,
            dependency_graph,
            layers,
        },
        contracts: ContractsSection::default(),
        governance: GovernanceSection {
            protected_paths: vec!["BUILD_PHILOSOPHY.md".to_string(), "foreman/governance/".to_string()],
            constraint_ids: vec![],
            version: "1.0.0".to_string(),
        },
        hash: String::new(),
    };
    sig.hash = hash_signature(&sig).unwrap();
    sig
}

fn api(endpoint: &str, response: serde_json::Value, version: &str) -> ApiContract {
    ApiContract {
        endpoint: endpoint.to_string(),
        method: "GET".to_string(),
        request_schema: json!({}),
        response_schema: response,
        version: version.to_string(),
    }
}

// ─── Structural ─────────────────────────────────────────────────────────

#[test]
fn two_module_cycle_is_reported_once() {
    let sig = signature(vec![
        module("lib/alpha.ts", &["./beta"]),
        module("lib/beta.ts", &["./alpha"]),
    ]);
    let report = detect_violations(&sig, &builtin_constraints());

    assert_eq!(report.summary.total, 1);
    assert_eq!(report.summary.by_type.structural, 1);
    let v = &report.violations[0];
    assert_eq!(v.constraint_id, "structural.no-circular-deps");
    assert_eq!(v.description, "Circular dependency detected: alpha → beta → alpha");
    assert_eq!(v.context["cycle"], json!(["alpha", "beta", "alpha"]));
    match &v.detail {
        ViolationDetail::Structural {
            structural_type,
            affected_modules,
            ..
        } => {
            assert_eq!(*structural_type, StructuralType::CircularDependency);
            assert_eq!(affected_modules, &vec!["alpha", "beta", "alpha"]);
        }
        other => panic!("unexpected detail {other:?}"),
    }
    assert_eq!(report.signature_hash, sig.hash);
    assert_eq!(report.commit, "abc123");
}

#[test]
fn acyclic_graph_has_no_cycles() {
    let sig = signature(vec![
        module("lib/alpha.ts", &["./beta"]),
        module("lib/beta.ts", &["./gamma"]),
        module("lib/gamma.ts", &[]),
    ]);
    assert!(structural::find_cycles(&sig).is_empty());
}

#[test]
fn layer_violation_reports_from_and_to() {
    let sig = signature(vec![
        module("app/api/handler.ts", &["../../lib/foreman/constitution/charter"]),
        module("lib/foreman/constitution/charter.ts", &[]),
    ]);
    let report = detect_violations_by_type(&sig, ConstraintType::Structural, &builtin_constraints());

    assert_eq!(report.summary.total, 1);
    let v = &report.violations[0];
    assert_eq!(v.constraint_id, "structural.layer-boundaries");
    assert_eq!(v.context["fromLayer"], json!("api"));
    assert_eq!(v.context["toLayer"], json!("constitutional"));
    assert_eq!(v.description, "Layer violation: api layer cannot depend on constitutional layer");
}

#[test]
fn allowed_layer_edge_is_clean() {
    let sig = signature(vec![
        module("app/api/handler.ts", &["../../lib/strings"]),
        module("lib/strings.ts", &[]),
    ]);
    let report = detect_violations(&sig, &builtin_constraints());
    assert_eq!(report.summary.total, 0);
}

#[test]
fn edge_into_uncatalogued_layer_uses_module_layer() {
    let page = module("app/page.ts", &["../infra/db"]);
    let mut db = module("infra/db.ts", &[]);
    db.layer = "infrastructure".to_string();
    let mut sig = signature(vec![page, db]);
    sig.structure.layers = vec![LayerDefinition {
        name: "application".to_string(),
        description: "Application layer".to_string(),
        allowed_dependencies: vec![],
        modules: vec!["page".to_string()],
    }];

    let report = detect_violations_by_type(&sig, ConstraintType::Structural, &builtin_constraints());
    assert_eq!(report.summary.total, 1);
    let v = &report.violations[0];
    assert_eq!(v.context["fromLayer"], json!("application"));
    assert_eq!(v.context["toLayer"], json!("infrastructure"));
    assert_eq!(v.context["allowedDependencies"], json!([]));
    assert_eq!(
        v.description,
        "Layer violation: application layer cannot depend on infrastructure layer"
    );
    match &v.detail {
        ViolationDetail::Structural {
            structural_type,
            affected_modules,
            ..
        } => {
            assert_eq!(*structural_type, StructuralType::LayerViolation);
            assert_eq!(affected_modules, &vec!["page", "db"]);
        }
        other => panic!("unexpected detail {other:?}"),
    }
}

// ─── Governance ─────────────────────────────────────────────────────────

#[test]
fn module_under_protected_path_is_flagged() {
    let sig = signature(vec![module("lib/foreman/governance/policy.ts", &[])]);
    let report = detect_violations_by_type(&sig, ConstraintType::Governance, &builtin_constraints());

    assert_eq!(report.summary.by_type.governance, 1);
    let v = &report.violations[0];
    assert_eq!(v.file(), Some("lib/foreman/governance/policy.ts"));
    assert_eq!(v.context["protectedPath"], json!("foreman/governance/"));
    assert_eq!(v.description, "Protected file modified: lib/foreman/governance/policy.ts");
}

// ─── Contract ───────────────────────────────────────────────────────────

#[test]
fn changed_response_schema_is_breaking() {
    let mut baseline = signature(vec![]);
    baseline.contracts.apis = vec![
        api("/api/users", json!({"id": "string"}), "1.0.0"),
        api("/api/removed", json!({}), "1.0.0"),
    ];
    let mut current = signature(vec![]);
    current.contracts.apis = vec![
        api("/api/users", json!({"id": "number"}), "2.0.0"),
        api("/api/added", json!({}), "1.0.0"),
    ];

    let report = detect_violations_with_baseline(&baseline, &current, &builtin_constraints());
    assert_eq!(report.summary.by_type.contract, 1);
    let v = &report.violations[0];
    assert_eq!(v.description, "Breaking API change detected in /api/users");
    match &v.detail {
        ViolationDetail::Contract {
            old_version,
            new_version,
            breaking_change,
            ..
        } => {
            assert_eq!(old_version, "1.0.0");
            assert_eq!(new_version, "2.0.0");
            assert!(breaking_change);
        }
        other => panic!("unexpected detail {other:?}"),
    }
}

#[test]
fn contract_checks_need_a_baseline() {
    let mut sig = signature(vec![]);
    sig.contracts.apis = vec![api("/api/users", json!({"id": "string"}), "1.0.0")];
    let report = detect_violations(&sig, &builtin_constraints());
    assert_eq!(report.summary.by_type.contract, 0);
}

// ─── Wire format ────────────────────────────────────────────────────────

#[test]
fn raw_violation_serializes_flat_with_type_tag() {
    let sig = signature(vec![
        module("lib/alpha.ts", &["./beta"]),
        module("lib/beta.ts", &["./alpha"]),
    ]);
    let report = detect_violations(&sig, &builtin_constraints());
    let value = serde_json::to_value(&report.violations[0]).unwrap();
    assert_eq!(value["type"], json!("structural"));
    assert_eq!(value["structuralType"], json!("circular_dependency"));
    assert_eq!(value["constraintId"], json!("structural.no-circular-deps"));
    assert!(value.get("detail").is_none());

    let back: RawViolation = serde_json::from_value(value).unwrap();
    assert_eq!(back, report.violations[0]);
}

#[test]
fn no_constraints_means_empty_report() {
    let sig = signature(vec![
        module("lib/alpha.ts", &["./beta"]),
        module("lib/beta.ts", &["./alpha"]),
    ]);
    let report = detect_violations(&sig, &[]);
    assert_eq!(report.summary.total, 0);
    assert!(report.violations.is_empty());
}
