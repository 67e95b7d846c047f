//! Telemetry errors.

use super::error_code::{self, AceErrorCode};

/// Errors from the telemetry path. Emitters swallow these after logging.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Memory fabric unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Telemetry queue full, event {event_id} dropped")]
    ChannelFull { event_id: String },

    #[error("Telemetry worker stopped, event {event_id} dropped")]
    ChannelClosed { event_id: String },

    #[error("Memory fabric write failed: {0}")]
    SinkFailure(String),
}

impl AceErrorCode for TelemetryError {
    fn error_code(&self) -> &'static str {
        error_code::TELEMETRY_ERROR
    }
}
