//! Signature generation.

use std::path::Path;
use std::sync::Arc;

use ace_core::config::AceConfig;
use ace_core::constants::{GOVERNANCE_VERSION, SIGNATURE_VERSION};
use chrono::{SecondsFormat, Utc};

use super::contracts::{ContractExtractor, NoContracts};
use super::graph::build_dependency_graph;
use super::layers::define_layers;
use super::persistence::hash_signature;
use super::repository::repository_info;
use super::scanner::ModuleScanner;
use super::types::{ArchitectureSignature, GovernanceSection, StructureSection};

/// Per-run inputs that are not configuration.
#[derive(Debug, Clone, Default)]
pub struct SignatureOptions {
    /// Pin the timestamp for reproducible output.
    pub fixed_timestamp: Option<String>,
    /// Constraint ids from the registry; stored sorted.
    pub constraint_ids: Vec<String>,
}

/// Generates architecture signatures from a repository checkout.
pub struct SignatureEngine {
    config: AceConfig,
    extractor: Arc<dyn ContractExtractor>,
}

impl SignatureEngine {
    pub fn new(config: AceConfig) -> Self {
        Self {
            config,
            extractor: Arc::new(NoContracts),
        }
    }

    pub fn with_contract_extractor(mut self, extractor: Arc<dyn ContractExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Generate the signature of `repo_root`.
    ///
    /// Never fails: VCS errors fall back to sentinel values and scan errors
    /// drop the affected files. Two runs over the same tree with the same
    /// options produce the same hash.
    pub fn generate(&self, repo_root: &Path, options: &SignatureOptions) -> ArchitectureSignature {
        let scan = &self.config.scan;
        let timestamp = options
            .fixed_timestamp
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

        let repository = repository_info(
            repo_root,
            scan.effective_repository_url(),
            scan.effective_include_commit(),
            scan.effective_include_branch(),
        );

        let modules = ModuleScanner::new(scan.clone()).scan(repo_root);
        let dependency_graph = build_dependency_graph(&modules);
        let layers = define_layers(&modules);
        let contracts = self.extractor.extract(repo_root, &modules);

        let mut constraint_ids = options.constraint_ids.clone();
        constraint_ids.sort();
        constraint_ids.dedup();

        let mut signature = ArchitectureSignature {
            version: SIGNATURE_VERSION.to_string(),
            timestamp,
            repository,
            structure: StructureSection {
                modules,
                dependency_graph,
                layers,
            },
            contracts,
            governance: GovernanceSection {
                protected_paths: self.config.governance.effective_protected_paths(),
                constraint_ids,
                version: GOVERNANCE_VERSION.to_string(),
            },
            hash: String::new(),
        };

        signature.hash = hash_signature(&signature).unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to hash signature");
            String::new()
        });

        tracing::info!(
            hash = %signature.hash,
            modules = signature.structure.modules.len(),
            edges = signature.structure.dependency_graph.edges.len(),
            commit = %signature.repository.commit,
            "architecture signature generated"
        );
        signature
    }
}

impl Default for SignatureEngine {
    fn default() -> Self {
        Self::new(AceConfig::default())
    }
}
