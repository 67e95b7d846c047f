//! Contract extraction seam.

use std::path::Path;

use super::types::{ContractsSection, ModuleSignature};

/// Supplies the `contracts` section of a signature. Implementations read
/// whatever sources describe the public API, types, and events.
pub trait ContractExtractor: Send + Sync {
    fn extract(&self, repo_root: &Path, modules: &[ModuleSignature]) -> ContractsSection;
}

/// Extractor that reports no contracts; the section keeps its shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoContracts;

impl ContractExtractor for NoContracts {
    fn extract(&self, _repo_root: &Path, _modules: &[ModuleSignature]) -> ContractsSection {
        ContractsSection::default()
    }
}
