//! Layer assignment and the fixed layer catalogue.

use super::types::{LayerDefinition, ModuleSignature};

pub const UNKNOWN_LAYER: &str = "unknown";

/// Ordered most-specific-first; the first rule whose fragment occurs in the
/// path wins.
const LAYER_RULES: &[(&str, &str)] = &[
    ("lib/foreman/governance", "governance"),
    ("lib/foreman/constitution", "constitutional"),
    ("lib/foreman", "foreman"),
    ("app/api", "api"),
    ("app/", "application"),
    ("lib/", "library"),
];

/// (name, description, allowed dependencies)
const LAYER_CATALOGUE: &[(&str, &str, &[&str])] = &[
    ("constitutional", "Constitutional and governance rules", &[]),
    ("governance", "Governance enforcement layer", &["constitutional"]),
    ("foreman", "Orchestration layer", &["governance", "constitutional"]),
    ("api", "API endpoints", &["foreman", "governance", "library"]),
    ("application", "Application layer", &["api", "foreman", "library"]),
    ("library", "Utility libraries", &[]),
];

/// Layer for a repository-relative, `/`-separated path.
pub fn determine_layer(relative_path: &str) -> &'static str {
    LAYER_RULES
        .iter()
        .find(|(fragment, _)| relative_path.contains(fragment))
        .map(|(_, layer)| *layer)
        .unwrap_or(UNKNOWN_LAYER)
}

/// The layer catalogue sorted by name, with each layer's `modules` filled
/// from the scanned modules assigned to it.
pub fn define_layers(modules: &[ModuleSignature]) -> Vec<LayerDefinition> {
    let mut layers: Vec<LayerDefinition> = LAYER_CATALOGUE
        .iter()
        .map(|(name, description, allowed)| {
            let mut members: Vec<String> = modules
                .iter()
                .filter(|m| m.layer == *name)
                .map(|m| m.name.clone())
                .collect();
            members.sort();
            members.dedup();
            LayerDefinition {
                name: name.to_string(),
                description: description.to_string(),
                allowed_dependencies: allowed.iter().map(|d| d.to_string()).collect(),
                modules: members,
            }
        })
        .collect();
    layers.sort_by(|a, b| a.name.cmp(&b.name));
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_specific_rule_wins() {
        assert_eq!(determine_layer("lib/foreman/governance/rules.ts"), "governance");
        assert_eq!(determine_layer("lib/foreman/constitution/cs1.ts"), "constitutional");
        assert_eq!(determine_layer("lib/foreman/dispatch.ts"), "foreman");
        assert_eq!(determine_layer("app/api/builds/route.ts"), "api");
        assert_eq!(determine_layer("app/dashboard/page.tsx"), "application");
        assert_eq!(determine_layer("lib/utils/date.ts"), "library");
        assert_eq!(determine_layer("scripts/seed.ts"), UNKNOWN_LAYER);
    }

    #[test]
    fn catalogue_is_sorted_by_name() {
        let names: Vec<String> = define_layers(&[]).into_iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec!["api", "application", "constitutional", "foreman", "governance", "library"]
        );
    }
}
