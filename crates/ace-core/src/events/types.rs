//! Event payload types.

/// Payload for `on_signature_generated`.
#[derive(Debug, Clone)]
pub struct SignatureGeneratedEvent {
    pub hash: String,
    pub module_count: usize,
    pub edge_count: usize,
    pub commit: String,
}

/// Payload for `on_detection_complete`.
#[derive(Debug, Clone)]
pub struct DetectionCompleteEvent {
    pub signature_hash: String,
    pub total: usize,
    pub structural: usize,
    pub contract: usize,
    pub governance: usize,
}

/// Payload for `on_violation_classified`.
#[derive(Debug, Clone)]
pub struct ViolationClassifiedEvent {
    pub violation_id: String,
    pub constraint_id: String,
    pub severity: String,
    pub nature: String,
}

/// Payload for `on_enforcement_decided`.
#[derive(Debug, Clone)]
pub struct EnforcementDecidedEvent {
    pub hook_name: String,
    pub violation_id: String,
    pub action: String,
    pub cs_boundary: Option<String>,
}

/// Payload for `on_operation_blocked`.
#[derive(Debug, Clone)]
pub struct OperationBlockedEvent {
    pub hook_name: String,
    pub violation_id: String,
    pub reason: String,
    pub override_allowed: bool,
}

/// Payload for `on_telemetry_dropped`.
#[derive(Debug, Clone)]
pub struct TelemetryDroppedEvent {
    pub event_id: String,
    pub reason: String,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
