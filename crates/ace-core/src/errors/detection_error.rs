//! Detection errors.

use super::error_code::{self, AceErrorCode};

/// Internal detection faults. Detection never propagates these; they are
/// logged and the report degrades to empty.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Detector {check} panicked: {message}")]
    DetectorPanic { check: String, message: String },
}

impl AceErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        error_code::DETECTION_ERROR
    }
}
