//! End-to-end governance runs over real trees, plus report rendering.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ace_analysis::classification::ViolationSeverity;
use ace_analysis::constraints::InMemoryConstraintRegistry;
use ace_analysis::enforcement::*;
use ace_analysis::pipeline::GovernancePipeline;
use ace_analysis::reporters::{available_formats, create_reporter, render_blocking_error};
use ace_analysis::telemetry::{InMemoryFabric, TelemetryEmitter};
use ace_core::config::{AceConfig, ScanConfig, TelemetryConfig};
use ace_core::events::types::*;
use ace_core::events::{AceEventHandler, EventDispatcher};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn offline_config() -> AceConfig {
    AceConfig {
        scan: ScanConfig {
            include_commit: Some(false),
            include_branch: Some(false),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn cyclic_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "lib/alpha.ts",
        "import { beta } from './beta';\nexport const alpha = () => beta();\n",
    );
    write(
        dir.path(),
        "lib/beta.ts",
        "import { alpha } from './alpha';\nexport const beta = () => alpha();\n",
    );
    dir
}

fn clean_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib/alpha.ts", "import { beta } from './beta';\nexport const alpha = 1;\n");
    write(dir.path(), "lib/beta.ts", "export const beta = 2;\n");
    dir
}

fn pre_merge_blocking_critical() -> EnforcementHook {
    EnforcementHook {
        name: HookName::PreMerge,
        enabled: true,
        config: HookConfig {
            block_on_severity: vec![ViolationSeverity::Critical],
            warn_on_severity: vec![ViolationSeverity::High],
            allow_override: true,
            log_to_memory: true,
            ..Default::default()
        },
    }
}

fn pipeline(dir: &TempDir) -> GovernancePipeline {
    let pipeline = GovernancePipeline::new(
        dir.path(),
        offline_config(),
        Arc::new(InMemoryConstraintRegistry::builtin()),
    );
    pipeline.hooks().register(pre_merge_blocking_critical());
    pipeline
}

fn ctx() -> EnforcementContext {
    EnforcementContext::new("merge", Environment::Production)
}

#[derive(Default)]
struct Counts {
    signatures: AtomicUsize,
    classified: AtomicUsize,
    decided: AtomicUsize,
    blocked: AtomicUsize,
    errors: AtomicUsize,
}

impl AceEventHandler for Counts {
    fn on_signature_generated(&self, _event: &SignatureGeneratedEvent) {
        self.signatures.fetch_add(1, Ordering::SeqCst);
    }

    fn on_violation_classified(&self, _event: &ViolationClassifiedEvent) {
        self.classified.fetch_add(1, Ordering::SeqCst);
    }

    fn on_enforcement_decided(&self, _event: &EnforcementDecidedEvent) {
        self.decided.fetch_add(1, Ordering::SeqCst);
    }

    fn on_operation_blocked(&self, _event: &OperationBlockedEvent) {
        self.blocked.fetch_add(1, Ordering::SeqCst);
    }

    fn on_error(&self, _event: &ErrorEvent) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

// ─── Blocking run ───────────────────────────────────────────────────────

#[test]
fn cycle_blocks_pre_merge_with_remediation() {
    let dir = cyclic_tree();
    let counts = Arc::new(Counts::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(counts.clone());
    let pipeline = pipeline(&dir).with_dispatcher(dispatcher);

    let err = pipeline.evaluate(HookName::PreMerge, &ctx(), None).unwrap_err();

    assert_eq!(err.blocks.len(), 1);
    let block = &err.blocks[0];
    assert_eq!(block.action.violation.constraint_id(), "structural.no-circular-deps");
    assert_eq!(block.action.violation.severity, ViolationSeverity::Critical);
    assert!(block.remediation.len() >= 3);
    assert!(block
        .override_instructions
        .as_deref()
        .unwrap()
        .contains("ACE_ENFORCEMENT_OVERRIDE"));
    assert_eq!(err.result.summary.blocked, 1);

    assert_eq!(counts.signatures.load(Ordering::SeqCst), 1);
    assert_eq!(counts.classified.load(Ordering::SeqCst), 1);
    assert_eq!(counts.decided.load(Ordering::SeqCst), 1);
    assert_eq!(counts.blocked.load(Ordering::SeqCst), 1);
    assert_eq!(counts.errors.load(Ordering::SeqCst), 1);

    let rendered = render_blocking_error(block);
    assert!(rendered.starts_with("✗ Operation blocked: critical structural violation must be fixed\n"));
    assert!(rendered.contains("3. Run enforcement check again to verify"));
}

#[test]
fn blocked_run_still_records_telemetry() {
    let dir = cyclic_tree();
    let fabric = Arc::new(InMemoryFabric::new());
    let telemetry = TelemetryConfig {
        enabled: Some(true),
        channel_capacity: Some(16),
    };
    let pipeline = pipeline(&dir).with_telemetry(TelemetryEmitter::new(&telemetry, fabric.clone()));

    assert!(pipeline.evaluate(HookName::PreMerge, &ctx(), None).is_err());
    drop(pipeline);

    assert_eq!(fabric.violation_count(), 1);
    assert_eq!(fabric.enforcement_count(), 1);
}

#[test]
fn report_only_hook_lets_the_run_finish() {
    let dir = cyclic_tree();
    let pipeline = pipeline(&dir);
    pipeline.hooks().update_config(
        HookName::PreMerge,
        HookConfigPatch {
            report_only: Some(true),
            ..Default::default()
        },
    );

    let outcome = pipeline.evaluate(HookName::PreMerge, &ctx(), None).unwrap();
    assert_eq!(outcome.report.summary.total, 1);
    assert_eq!(outcome.trigger.summary.blocked, 1);

    let console = create_reporter("console").unwrap().generate(&outcome.trigger).unwrap();
    assert!(console.contains("structural.no-circular-deps: Circular dependency detected: alpha → beta → alpha\n"));
    assert!(!console.contains('\u{2014}'));
    assert!(console.contains("Result: FAILED ✗"));
}

// ─── Passing run ────────────────────────────────────────────────────────

#[test]
fn clean_tree_passes() {
    let dir = clean_tree();
    let pipeline = pipeline(&dir);

    let outcome = pipeline.evaluate(HookName::PreMerge, &ctx(), None).unwrap();
    assert_eq!(outcome.classified.summary.total, 0);
    assert!(outcome.trigger.triggered);
    assert_eq!(outcome.trigger.summary.total(), 0);
    assert_eq!(outcome.signature.structure.modules.len(), 2);
    assert_eq!(
        outcome.signature.governance.constraint_ids,
        vec![
            "contract.api-stability",
            "governance.protected-paths",
            "structural.layer-boundaries",
            "structural.no-circular-deps",
        ]
    );

    let console = create_reporter("console").unwrap().generate(&outcome.trigger).unwrap();
    assert!(console.contains("Result: PASSED ✓"));

    let json = create_reporter("json").unwrap().generate(&outcome.trigger).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["hookName"], "pre-merge");
    assert_eq!(value["triggered"], true);
}

#[test]
fn unregistered_hook_does_not_trigger() {
    let dir = cyclic_tree();
    let pipeline = pipeline(&dir);
    let outcome = pipeline.evaluate(HookName::PreBuild, &ctx(), None).unwrap();
    assert_eq!(outcome.classified.summary.total, 1);
    assert!(!outcome.trigger.triggered);

    let console = create_reporter("console").unwrap().generate(&outcome.trigger).unwrap();
    assert!(console.contains("Hook pre-build not triggered"));
}

#[test]
fn baseline_run_is_deterministic() {
    let dir = clean_tree();
    let pipeline = pipeline(&dir);
    let pinned = Some("2026-01-01T00:00:00Z".to_string());
    let baseline = pipeline.generate_signature(pinned.clone());
    let current = pipeline.generate_signature(pinned);
    assert_eq!(baseline.hash, current.hash);

    let outcome = pipeline
        .evaluate_signature(current, HookName::PreMerge, &ctx(), Some(&baseline))
        .unwrap();
    assert_eq!(outcome.report.summary.total, 0);
}

#[test]
fn reporter_registry() {
    assert_eq!(available_formats(), &["console", "json"]);
    assert!(create_reporter("sarif").is_none());
    assert_eq!(create_reporter("json").unwrap().name(), "json");
}
