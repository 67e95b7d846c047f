//! Fire-and-forget telemetry emitter.
//!
//! Events go through a bounded channel to one worker thread that writes them
//! to the memory fabric. Emitting never blocks and never fails: a full queue,
//! a stopped worker, a sink error or a sink panic is logged and dropped.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use ace_core::config::TelemetryConfig;
use ace_core::constants::EVENT_SCHEMA_VERSION;
use ace_core::errors::{AceErrorCode, TelemetryError};
use ace_core::events::types::TelemetryDroppedEvent;
use ace_core::events::EventDispatcher;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::{debug, warn};

use crate::classification::ClassifiedViolation;
use crate::detection::now_millis;
use crate::enforcement::{EnforcementAction, ExecutionResult};
use crate::signature::ArchitectureSignature;

use super::sink::MemoryFabric;
use super::types::{
    DetectionMetadata, EnforcementEvent, EnforcementRecord, Explainability, ResultSnapshot, SignatureRef,
    ViolationEvent,
};

/// Recorded as `metadata.detectionMethod` on violation events.
pub const DETECTION_METHOD: &str = "signature-diff";

impl From<&ArchitectureSignature> for SignatureRef {
    fn from(signature: &ArchitectureSignature) -> Self {
        Self {
            commit: signature.repository.commit.clone(),
            branch: signature.repository.branch.clone(),
            signature_hash: signature.hash.clone(),
        }
    }
}

enum TelemetryMessage {
    Violation(Box<ViolationEvent>),
    Enforcement(Box<EnforcementEvent>),
}

impl TelemetryMessage {
    fn event_id(&self) -> &str {
        match self {
            Self::Violation(e) => &e.event_id,
            Self::Enforcement(e) => &e.event_id,
        }
    }
}

pub struct TelemetryEmitter {
    sender: Option<Sender<TelemetryMessage>>,
    worker: Option<JoinHandle<()>>,
    dispatcher: EventDispatcher,
    dropped: Arc<AtomicUsize>,
}

impl std::fmt::Debug for TelemetryEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryEmitter")
            .field("enabled", &self.is_enabled())
            .field("dropped", &self.dropped_count())
            .finish()
    }
}

impl TelemetryEmitter {
    /// Start the worker. A disabled config, or a worker that cannot be
    /// spawned, yields an emitter whose emits are no-ops.
    pub fn new(config: &TelemetryConfig, fabric: Arc<dyn MemoryFabric>) -> Self {
        Self::with_dispatcher(config, fabric, EventDispatcher::new())
    }

    pub fn with_dispatcher(
        config: &TelemetryConfig,
        fabric: Arc<dyn MemoryFabric>,
        dispatcher: EventDispatcher,
    ) -> Self {
        let dropped = Arc::new(AtomicUsize::new(0));
        if !config.effective_enabled() {
            debug!("telemetry disabled");
            return Self {
                sender: None,
                worker: None,
                dispatcher,
                dropped,
            };
        }

        let (sender, receiver) = crossbeam_channel::bounded(config.effective_channel_capacity());
        let worker_dropped = Arc::clone(&dropped);
        let worker_dispatcher = dispatcher.clone();
        let spawned = std::thread::Builder::new()
            .name("ace-telemetry".to_string())
            .spawn(move || run_worker(receiver, fabric, worker_dropped, worker_dispatcher));

        match spawned {
            Ok(handle) => Self {
                sender: Some(sender),
                worker: Some(handle),
                dispatcher,
                dropped,
            },
            Err(e) => {
                let err = TelemetryError::SinkUnavailable(e.to_string());
                warn!(error = %err.coded_string(), "telemetry worker not started, events will be dropped");
                Self {
                    sender: None,
                    worker: None,
                    dispatcher,
                    dropped,
                }
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Events lost to a full queue, a stopped worker or a failing sink.
    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn emit_violation_event(&self, violation: &ClassifiedViolation, signature: &SignatureRef) {
        let event = ViolationEvent {
            event_id: format!("event-{}", uuid::Uuid::new_v4()),
            timestamp: now_millis(),
            version: EVENT_SCHEMA_VERSION.to_string(),
            violation: violation.clone(),
            signature: signature.clone(),
            metadata: DetectionMetadata {
                detection_method: DETECTION_METHOD.to_string(),
                false_positive: violation.false_positive,
                suppression_id: violation.suppression_id.clone(),
            },
        };
        self.send(TelemetryMessage::Violation(Box::new(event)));
    }

    /// Enqueue one event per violation without waiting on the sink.
    pub fn emit_violation_batch(&self, violations: &[ClassifiedViolation], signature: &SignatureRef) {
        for violation in violations {
            self.emit_violation_event(violation, signature);
        }
    }

    pub fn emit_enforcement_event(&self, action: &EnforcementAction, result: &ExecutionResult) {
        let event = EnforcementEvent {
            event_id: format!("enforcement-{}", uuid::Uuid::new_v4()),
            timestamp: now_millis(),
            version: EVENT_SCHEMA_VERSION.to_string(),
            enforcement: EnforcementRecord {
                hook_name: action.metadata.hook_name,
                action_type: action.action_type,
                violation: action.violation.clone(),
                reason: action.reason.clone(),
                governance_context: action.governance_context.clone(),
            },
            result: ResultSnapshot {
                blocked: result.blocked,
                escalated: result.escalated,
                approval_required: result.approval_required,
                success: result.success,
            },
            explainability: Explainability {
                decision_path: action.metadata.decision_path.clone(),
                rules: Vec::new(),
                overridden: false,
                override_reason: None,
            },
        };
        self.send(TelemetryMessage::Enforcement(Box::new(event)));
    }

    fn send(&self, message: TelemetryMessage) {
        let Some(sender) = &self.sender else {
            return;
        };
        if let Err(e) = sender.try_send(message) {
            let (message, err) = match e {
                TrySendError::Full(m) => {
                    let event_id = m.event_id().to_string();
                    (m, TelemetryError::ChannelFull { event_id })
                }
                TrySendError::Disconnected(m) => {
                    let event_id = m.event_id().to_string();
                    (m, TelemetryError::ChannelClosed { event_id })
                }
            };
            record_drop(&self.dropped, &self.dispatcher, message.event_id(), &err);
        }
    }

    /// Close the queue, let the worker drain it, and join.
    pub fn shutdown(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("telemetry worker exited abnormally");
            }
        }
    }
}

impl Drop for TelemetryEmitter {
    fn drop(&mut self) {
        self.finish();
    }
}

fn run_worker(
    receiver: Receiver<TelemetryMessage>,
    fabric: Arc<dyn MemoryFabric>,
    dropped: Arc<AtomicUsize>,
    dispatcher: EventDispatcher,
) {
    for message in receiver {
        let stored = catch_unwind(AssertUnwindSafe(|| match &message {
            TelemetryMessage::Violation(event) => fabric.store_violation(event),
            TelemetryMessage::Enforcement(event) => fabric.store_enforcement(event),
        }));
        let err = match stored {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => e,
            Err(_) => TelemetryError::SinkFailure("memory fabric panicked".to_string()),
        };
        record_drop(&dropped, &dispatcher, message.event_id(), &err);
    }
    debug!("telemetry worker drained");
}

fn record_drop(dropped: &AtomicUsize, dispatcher: &EventDispatcher, event_id: &str, err: &TelemetryError) {
    dropped.fetch_add(1, Ordering::Relaxed);
    warn!(event_id, error = %err.coded_string(), "telemetry event dropped");
    dispatcher.emit_telemetry_dropped(&TelemetryDroppedEvent {
        event_id: event_id.to_string(),
        reason: err.to_string(),
    });
}
