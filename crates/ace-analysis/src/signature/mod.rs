//! Architecture signature: a deterministic, hashable snapshot of module
//! structure, dependency graph, layers, contracts, and governance metadata.

pub mod compare;
pub mod contracts;
pub mod engine;
pub mod extract;
pub mod graph;
pub mod layers;
pub mod persistence;
pub mod repository;
pub mod scanner;
pub mod types;

pub use compare::compare_signatures;
pub use contracts::{ContractExtractor, NoContracts};
pub use engine::{SignatureEngine, SignatureOptions};
pub use persistence::{hash_signature, load_signature_from_file, save_signature_to_file, verify_signature};
pub use types::*;
