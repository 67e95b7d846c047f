//! Module-level signature comparison.

use rustc_hash::{FxHashMap, FxHashSet};

use super::types::{ArchitectureSignature, DifferenceKind, SignatureComparison, SignatureDifference};

/// Compare two signatures.
///
/// `identical` is decided by hash alone. Differences list added modules (in
/// new-signature order), then removed modules (in old-signature order), then
/// modified modules whose content hash changed.
pub fn compare_signatures(old: &ArchitectureSignature, new: &ArchitectureSignature) -> SignatureComparison {
    let identical = old.hash == new.hash;
    let mut differences = Vec::new();

    if !identical {
        // Same-named modules compare against the first old occurrence.
        let mut old_hashes: FxHashMap<&str, &str> = FxHashMap::default();
        for m in &old.structure.modules {
            old_hashes.entry(m.name.as_str()).or_insert(m.hash.as_str());
        }
        let new_names: FxHashSet<&str> =
            new.structure.modules.iter().map(|m| m.name.as_str()).collect();

        let mut seen = FxHashSet::default();
        for module in &new.structure.modules {
            if !old_hashes.contains_key(module.name.as_str()) && seen.insert(module.name.as_str()) {
                differences.push(difference(DifferenceKind::Added, &module.name, "added"));
            }
        }

        let mut seen = FxHashSet::default();
        for module in &old.structure.modules {
            if !new_names.contains(module.name.as_str()) && seen.insert(module.name.as_str()) {
                differences.push(difference(DifferenceKind::Removed, &module.name, "removed"));
            }
        }

        for module in &new.structure.modules {
            if let Some(old_hash) = old_hashes.get(module.name.as_str()) {
                if *old_hash != module.hash {
                    differences.push(difference(DifferenceKind::Modified, &module.name, "modified"));
                }
            }
        }
    }

    SignatureComparison {
        identical,
        differences,
        old_hash: old.hash.clone(),
        new_hash: new.hash.clone(),
    }
}

fn difference(kind: DifferenceKind, name: &str, verb: &str) -> SignatureDifference {
    SignatureDifference {
        kind,
        path: format!("structure.modules.{name}"),
        description: format!("Module \"{name}\" was {verb}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::types::{
        ContractsSection, GovernanceSection, ModuleSignature, RepositoryInfo, StructureSection,
    };

    fn module(path: &str, hash: &str) -> ModuleSignature {
        ModuleSignature {
            name: "index".to_string(),
            path: path.to_string(),
            exports: vec![],
            imports: vec![],
            layer: "library".to_string(),
            hash: hash.to_string(),
        }
    }

    fn signature(modules: Vec<ModuleSignature>, hash: &str) -> ArchitectureSignature {
        ArchitectureSignature {
            version: "1.0.0".to_string(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            repository: RepositoryInfo {
                url: String::new(),
                commit: "0".repeat(40),
                branch: "unknown".to_string(),
            },
            structure: StructureSection {
                modules,
                ..Default::default()
            },
            contracts: ContractsSection::default(),
            governance: GovernanceSection {
                protected_paths: vec![],
                constraint_ids: vec![],
                version: "1.0.0".to_string(),
            },
            hash: hash.to_string(),
        }
    }

    #[test]
    fn duplicate_names_compare_against_first_old_module() {
        let old = signature(vec![module("lib/a/index.ts", "h1"), module("lib/b/index.ts", "h2")], "old");
        let new = signature(vec![module("lib/a/index.ts", "h1")], "new");
        let cmp = compare_signatures(&old, &new);
        assert!(!cmp.identical);
        assert!(cmp.differences.is_empty());

        let changed = signature(vec![module("lib/a/index.ts", "h3")], "changed");
        let cmp = compare_signatures(&old, &changed);
        assert_eq!(cmp.differences.len(), 1);
        assert_eq!(cmp.differences[0].kind, DifferenceKind::Modified);
        assert_eq!(cmp.differences[0].path, "structure.modules.index");
    }
}
