//! Signature generation and persistence errors.

use super::error_code::{self, AceErrorCode};

/// Errors raised while reading sources or persisting signatures.
///
/// Generation itself degrades instead of failing; these surface from the
/// persistence helpers and as logged diagnostics for skipped files.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid signature JSON in {path}: {message}")]
    Json { path: String, message: String },

    #[error("Walk error: {0}")]
    Walk(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl AceErrorCode for SignatureError {
    fn error_code(&self) -> &'static str {
        error_code::SIGNATURE_ERROR
    }
}
