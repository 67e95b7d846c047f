//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::AceEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AceEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn AceEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop the others.
    fn emit<F: Fn(&dyn AceEventHandler)>(&self, event_name: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!(event = event_name, "event handler panicked");
            }
        }
    }

    pub fn emit_signature_generated(&self, event: &SignatureGeneratedEvent) {
        self.emit("signature_generated", |h| h.on_signature_generated(event));
    }

    pub fn emit_detection_complete(&self, event: &DetectionCompleteEvent) {
        self.emit("detection_complete", |h| h.on_detection_complete(event));
    }

    pub fn emit_violation_classified(&self, event: &ViolationClassifiedEvent) {
        self.emit("violation_classified", |h| h.on_violation_classified(event));
    }

    pub fn emit_enforcement_decided(&self, event: &EnforcementDecidedEvent) {
        self.emit("enforcement_decided", |h| h.on_enforcement_decided(event));
    }

    pub fn emit_operation_blocked(&self, event: &OperationBlockedEvent) {
        self.emit("operation_blocked", |h| h.on_operation_blocked(event));
    }

    pub fn emit_telemetry_dropped(&self, event: &TelemetryDroppedEvent) {
        self.emit("telemetry_dropped", |h| h.on_telemetry_dropped(event));
    }

    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit("error", |h| h.on_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
