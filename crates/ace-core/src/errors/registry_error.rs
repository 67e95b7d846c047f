//! Constraint registry errors.

use super::error_code::{self, AceErrorCode};

/// Errors that can occur while building a constraint registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid constraint declaration {id}: {}", errors.join("; "))]
    InvalidDeclaration { id: String, errors: Vec<String> },

    #[error("Duplicate constraint id: {0}")]
    DuplicateId(String),

    #[error("Failed to read constraints from {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse constraints from {path}: {message}")]
    Parse { path: String, message: String },
}

impl AceErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        error_code::REGISTRY_ERROR
    }
}
