//! Signature data model. Serialized with camelCase keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whole-codebase snapshot. `hash` covers every other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureSignature {
    pub version: String,
    pub timestamp: String,
    pub repository: RepositoryInfo,
    pub structure: StructureSection,
    pub contracts: ContractsSection,
    pub governance: GovernanceSection,
    pub hash: String,
}

impl ArchitectureSignature {
    /// First module with the given name, in name order.
    pub fn module(&self, name: &str) -> Option<&ModuleSignature> {
        self.structure.modules.iter().find(|m| m.name == name)
    }

    pub fn layer(&self, name: &str) -> Option<&LayerDefinition> {
        self.structure.layers.iter().find(|l| l.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    pub url: String,
    pub commit: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureSection {
    pub modules: Vec<ModuleSignature>,
    pub dependency_graph: DependencyGraph,
    pub layers: Vec<LayerDefinition>,
}

/// One scanned source file. Rebuilt wholesale on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSignature {
    pub name: String,
    pub path: String,
    pub exports: Vec<String>,
    /// Relative (`.`/`/`-prefixed) import specifiers only.
    pub imports: Vec<String>,
    pub layer: String,
    /// SHA-256 of `{path, content}`.
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<DependencyEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Import,
    Require,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDefinition {
    pub name: String,
    pub description: String,
    pub allowed_dependencies: Vec<String>,
    pub modules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsSection {
    #[serde(default)]
    pub apis: Vec<ApiContract>,
    #[serde(default)]
    pub types: Vec<TypeContract>,
    #[serde(default)]
    pub events: Vec<EventContract>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContract {
    pub endpoint: String,
    pub method: String,
    #[serde(default)]
    pub request_schema: Value,
    #[serde(default)]
    pub response_schema: Value,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeContract {
    pub name: String,
    pub file: String,
    pub definition: String,
    pub exported: bool,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContract {
    pub name: String,
    #[serde(default)]
    pub payload: Value,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceSection {
    pub protected_paths: Vec<String>,
    pub constraint_ids: Vec<String>,
    pub version: String,
}

/// Result of comparing two signatures module by module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureComparison {
    pub identical: bool,
    pub differences: Vec<SignatureDifference>,
    pub old_hash: String,
    pub new_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDifference {
    #[serde(rename = "type")]
    pub kind: DifferenceKind,
    pub path: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    Added,
    Removed,
    Modified,
}
