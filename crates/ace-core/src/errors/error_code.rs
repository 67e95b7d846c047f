//! Stable error codes shared by every subsystem error.

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SIGNATURE_ERROR: &str = "SIGNATURE_ERROR";
pub const REGISTRY_ERROR: &str = "REGISTRY_ERROR";
pub const DETECTION_ERROR: &str = "DETECTION_ERROR";
pub const TELEMETRY_ERROR: &str = "TELEMETRY_ERROR";
pub const ENFORCEMENT_BLOCKED: &str = "ENFORCEMENT_BLOCKED";
pub const HOOK_BLOCKED: &str = "HOOK_BLOCKED";

/// Implemented by every error enum so callers can branch on a stable code.
pub trait AceErrorCode: std::fmt::Display {
    /// Stable, machine-readable code.
    fn error_code(&self) -> &'static str;

    /// `[CODE] message`, the form written to logs and CI output.
    fn coded_string(&self) -> String {
        format!("[{}] {}", self.error_code(), self)
    }
}
