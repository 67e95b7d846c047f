//! Deterministic content hashing over canonical JSON.

pub mod canonical;

pub use canonical::{canonicalize, hash_object, hash_serializable, sha256_hex};
