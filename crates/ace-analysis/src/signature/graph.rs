//! Dependency graph derivation from scanned modules.

use super::types::{DependencyEdge, DependencyGraph, EdgeKind, ModuleSignature};

/// Resolve an import specifier to the first module, in name order, whose
/// name occurs anywhere in the specifier.
///
/// This is a substring heuristic, not module resolution: `./utils/hash`
/// resolves to a module named `hash`, but also to one named `utils` or `h`
/// if that sorts first.
pub fn resolve_import_to_module<'a>(
    import_path: &str,
    modules_by_name: &'a [ModuleSignature],
) -> Option<&'a str> {
    modules_by_name
        .iter()
        .find(|m| !m.name.is_empty() && import_path.contains(m.name.as_str()))
        .map(|m| m.name.as_str())
}

/// Nodes are the sorted, de-duplicated module names; one `import` edge per
/// resolved import. Edges are sorted by `(from, to)`.
pub fn build_dependency_graph(modules: &[ModuleSignature]) -> DependencyGraph {
    let mut by_name: Vec<ModuleSignature> = modules.to_vec();
    by_name.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));

    let mut nodes: Vec<String> = by_name.iter().map(|m| m.name.clone()).collect();
    nodes.dedup();

    let mut edges = Vec::new();
    for module in &by_name {
        for import in &module.imports {
            if let Some(target) = resolve_import_to_module(import, &by_name) {
                edges.push(DependencyEdge {
                    from: module.name.clone(),
                    to: target.to_string(),
                    kind: EdgeKind::Import,
                });
            }
        }
    }
    edges.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.to.cmp(&b.to)));

    DependencyGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str, imports: &[&str]) -> ModuleSignature {
        ModuleSignature {
            name: name.to_string(),
            path: format!("lib/{name}.ts"),
            exports: vec![],
            imports: imports.iter().map(|s| s.to_string()).collect(),
            layer: "library".to_string(),
            hash: String::new(),
        }
    }

    #[test]
    fn edges_follow_substring_resolution() {
        let modules = vec![
            module("engine", &["./hash", "./sort"]),
            module("hash", &[]),
            module("sort", &["./hash"]),
        ];
        let graph = build_dependency_graph(&modules);
        assert_eq!(graph.nodes, vec!["engine", "hash", "sort"]);
        let pairs: Vec<(&str, &str)> = graph
            .edges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(pairs, vec![("engine", "hash"), ("engine", "sort"), ("sort", "hash")]);
    }

    #[test]
    fn first_name_in_sorted_order_wins() {
        // "./utils/hash" contains both "hash" and "utils"; "hash" sorts first.
        let modules = vec![module("utils", &[]), module("hash", &[])];
        let mut sorted = modules.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(resolve_import_to_module("./utils/hash", &sorted), Some("hash"));
        assert_eq!(resolve_import_to_module("./missing", &sorted), None);
    }

    #[test]
    fn self_import_produces_self_edge() {
        let graph = build_dependency_graph(&[module("loop", &["./loop"])]);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].from, graph.edges[0].to);
    }
}
