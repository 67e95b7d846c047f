//! Signature hashing and JSON persistence.

use std::path::Path;

use ace_core::errors::SignatureError;

use super::types::ArchitectureSignature;
use crate::hashing::hash_serializable;

/// Hash of the signature with its top-level `hash` field excluded.
pub fn hash_signature(signature: &ArchitectureSignature) -> Result<String, SignatureError> {
    hash_serializable(signature, true).map_err(|e| SignatureError::Serialization(e.to_string()))
}

/// Whether the stored hash matches the recomputed one. Loading does not
/// check this; callers that need integrity ask explicitly.
pub fn verify_signature(signature: &ArchitectureSignature) -> Result<bool, SignatureError> {
    Ok(hash_signature(signature)? == signature.hash)
}

/// Load a signature from a JSON file. The stored hash is trusted as-is.
pub fn load_signature_from_file(path: &Path) -> Result<ArchitectureSignature, SignatureError> {
    let content = std::fs::read_to_string(path).map_err(|e| SignatureError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| SignatureError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write a signature as pretty-printed JSON, creating parent directories.
pub fn save_signature_to_file(signature: &ArchitectureSignature, path: &Path) -> Result<(), SignatureError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SignatureError::Io {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }
    }
    let json = serde_json::to_string_pretty(signature)
        .map_err(|e| SignatureError::Serialization(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| SignatureError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
