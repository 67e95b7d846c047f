//! AceEventHandler trait with no-op defaults.

use super::types::*;

/// Receives pipeline lifecycle events. Every method defaults to a no-op, so
/// implementors override only what they observe.
pub trait AceEventHandler: Send + Sync {
    fn on_signature_generated(&self, _event: &SignatureGeneratedEvent) {}

    fn on_detection_complete(&self, _event: &DetectionCompleteEvent) {}

    fn on_violation_classified(&self, _event: &ViolationClassifiedEvent) {}

    fn on_enforcement_decided(&self, _event: &EnforcementDecidedEvent) {}

    fn on_operation_blocked(&self, _event: &OperationBlockedEvent) {}

    fn on_telemetry_dropped(&self, _event: &TelemetryDroppedEvent) {}

    fn on_error(&self, _event: &ErrorEvent) {}
}
