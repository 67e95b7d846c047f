//! GovernancePipeline: one governance run from checkout to enforcement.
//!
//! Owns the configuration, the constraint registry handle, the hook registry,
//! an optional telemetry emitter and the event dispatcher. Each stage can
//! also be used on its own.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ace_core::config::AceConfig;
use ace_core::events::types::{
    DetectionCompleteEvent, EnforcementDecidedEvent, ErrorEvent, OperationBlockedEvent, SignatureGeneratedEvent,
    ViolationClassifiedEvent,
};
use ace_core::errors::AceErrorCode;
use ace_core::events::EventDispatcher;
use tracing::{info, warn};

use crate::classification::{classify_violation_report, ClassifiedViolationReport};
use crate::constraints::ConstraintRegistry;
use crate::detection::{detect_violations, detect_violations_with_baseline, ViolationReport};
use crate::enforcement::{
    ActionExecutor, EnforcementContext, HookBlockedError, HookName, HookRegistry, HookTriggerResult,
};
use crate::signature::{ArchitectureSignature, ContractExtractor, SignatureEngine, SignatureOptions};
use crate::telemetry::{SignatureRef, TelemetryEmitter};

/// Everything one successful run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub signature: ArchitectureSignature,
    pub report: ViolationReport,
    pub classified: ClassifiedViolationReport,
    pub trigger: HookTriggerResult,
}

pub struct GovernancePipeline {
    repo_root: PathBuf,
    config: AceConfig,
    registry: Arc<dyn ConstraintRegistry>,
    hooks: HookRegistry,
    telemetry: Option<TelemetryEmitter>,
    dispatcher: EventDispatcher,
    engine: SignatureEngine,
}

impl GovernancePipeline {
    pub fn new(repo_root: impl Into<PathBuf>, config: AceConfig, registry: Arc<dyn ConstraintRegistry>) -> Self {
        let hooks = HookRegistry::with_executor(ActionExecutor::new(&config.enforcement));
        Self {
            repo_root: repo_root.into(),
            engine: SignatureEngine::new(config.clone()),
            config,
            registry,
            hooks,
            telemetry: None,
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn with_telemetry(mut self, emitter: TelemetryEmitter) -> Self {
        self.telemetry = Some(emitter);
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_contract_extractor(mut self, extractor: Arc<dyn ContractExtractor>) -> Self {
        self.engine = SignatureEngine::new(self.config.clone()).with_contract_extractor(extractor);
        self
    }

    /// Share an existing hook registry instead of the pipeline's own.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn config(&self) -> &AceConfig {
        &self.config
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn telemetry(&self) -> Option<&TelemetryEmitter> {
        self.telemetry.as_ref()
    }

    /// Generate the current signature, embedding the registry's constraint ids.
    pub fn generate_signature(&self, fixed_timestamp: Option<String>) -> ArchitectureSignature {
        let options = SignatureOptions {
            fixed_timestamp,
            constraint_ids: self.registry.ids(),
        };
        let signature = self.engine.generate(&self.repo_root, &options);
        self.dispatcher.emit_signature_generated(&SignatureGeneratedEvent {
            hash: signature.hash.clone(),
            module_count: signature.structure.modules.len(),
            edge_count: signature.structure.dependency_graph.edges.len(),
            commit: signature.repository.commit.clone(),
        });
        signature
    }

    /// Full run: signature, detection, classification, telemetry, enforcement.
    pub fn evaluate(
        &self,
        hook: HookName,
        context: &EnforcementContext,
        baseline: Option<&ArchitectureSignature>,
    ) -> Result<PipelineOutcome, Box<HookBlockedError>> {
        let signature = self.generate_signature(None);
        self.evaluate_signature(signature, hook, context, baseline)
    }

    /// Run every stage after signature generation against `signature`.
    pub fn evaluate_signature(
        &self,
        signature: ArchitectureSignature,
        hook: HookName,
        context: &EnforcementContext,
        baseline: Option<&ArchitectureSignature>,
    ) -> Result<PipelineOutcome, Box<HookBlockedError>> {
        let constraints = self.registry.all();

        let report = match baseline {
            Some(baseline) => detect_violations_with_baseline(baseline, &signature, &constraints),
            None => detect_violations(&signature, &constraints),
        };
        self.dispatcher.emit_detection_complete(&DetectionCompleteEvent {
            signature_hash: report.signature_hash.clone(),
            total: report.summary.total,
            structural: report.summary.by_type.structural,
            contract: report.summary.by_type.contract,
            governance: report.summary.by_type.governance,
        });

        let classified = classify_violation_report(&report, &constraints);
        for v in &classified.violations {
            self.dispatcher.emit_violation_classified(&ViolationClassifiedEvent {
                violation_id: v.id.clone(),
                constraint_id: v.constraint_id().to_string(),
                severity: v.severity.to_string(),
                nature: v.nature.to_string(),
            });
        }

        if let Some(emitter) = &self.telemetry {
            emitter.emit_violation_batch(&classified.violations, &SignatureRef::from(&signature));
        }

        info!(
            hash = %signature.hash,
            violations = classified.summary.total,
            hook = %hook,
            "governance evaluation"
        );

        match self.hooks.trigger(hook, &classified.violations, context) {
            Ok(trigger) => {
                self.record_enforcement(&trigger);
                Ok(PipelineOutcome {
                    signature,
                    report,
                    classified,
                    trigger,
                })
            }
            Err(blocked) => {
                self.record_enforcement(&blocked.result);
                for b in &blocked.blocks {
                    self.dispatcher.emit_operation_blocked(&OperationBlockedEvent {
                        hook_name: hook.name().to_string(),
                        violation_id: b.action.violation.id.clone(),
                        reason: b.action.reason.clone(),
                        override_allowed: b.action.governance_context.override_allowed,
                    });
                }
                warn!(error = %blocked.coded_string(), "operation blocked");
                self.dispatcher.emit_error(&ErrorEvent {
                    message: blocked.to_string(),
                    error_code: blocked.error_code().to_string(),
                });
                Err(Box::new(blocked))
            }
        }
    }

    fn record_enforcement(&self, trigger: &HookTriggerResult) {
        for action in &trigger.actions {
            self.dispatcher.emit_enforcement_decided(&EnforcementDecidedEvent {
                hook_name: trigger.hook_name.name().to_string(),
                violation_id: action.violation.id.clone(),
                action: action.action_type.name().to_string(),
                cs_boundary: action.governance_context.cs_boundary.map(|b| b.name().to_string()),
            });
        }

        let logs_to_memory = self
            .hooks
            .get(trigger.hook_name)
            .map(|h| h.config.log_to_memory)
            .unwrap_or(false);
        if let (true, Some(emitter)) = (logs_to_memory, &self.telemetry) {
            for (action, result) in trigger.actions.iter().zip(&trigger.results) {
                emitter.emit_enforcement_event(action, result);
            }
        }
    }
}
