//! Structural checks: dependency cycles and layer boundaries.

use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{depth_first_search, DfsEvent};
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::{json, Map};

use super::types::{now_millis, RawViolation, StructuralType, ViolationDetail};
use crate::constraints::{ConstraintCategory, ConstraintDeclaration, ConstraintType};
use crate::signature::ArchitectureSignature;

/// Run the structural checks selected by each structural constraint.
pub fn detect_structural_violations(
    signature: &ArchitectureSignature,
    constraints: &[ConstraintDeclaration],
) -> Vec<RawViolation> {
    let mut violations = Vec::new();
    for constraint in constraints
        .iter()
        .filter(|c| c.constraint_type == ConstraintType::Structural)
    {
        if constraint.category == ConstraintCategory::DependencyDirection
            || constraint.id.contains("circular")
        {
            violations.extend(detect_circular_dependencies(signature, constraint));
        }
        if constraint.category == ConstraintCategory::LayerViolation || constraint.id.contains("layer") {
            violations.extend(detect_layer_violations(signature, constraint));
        }
    }
    violations
}

/// Closed cycles found by a DFS over the dependency graph, one per back-edge.
///
/// Roots are visited in node order, neighbours in edge order, so the result
/// is deterministic. Each cycle starts at the node the back-edge points to
/// and repeats it at the end: `[a, b, a]`.
pub fn find_cycles(signature: &ArchitectureSignature) -> Vec<Vec<String>> {
    let graph_data = &signature.structure.dependency_graph;
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for node in &graph_data.nodes {
        graph.add_node(node.as_str());
    }
    for edge in &graph_data.edges {
        graph.add_edge(edge.from.as_str(), edge.to.as_str(), ());
    }

    let roots: Vec<&str> = graph.nodes().collect();
    let mut stack: Vec<&str> = Vec::new();
    let mut cycles = Vec::new();

    depth_first_search(&graph, roots, |event| match event {
        DfsEvent::Discover(node, _) => stack.push(node),
        DfsEvent::Finish(_, _) => {
            stack.pop();
        }
        DfsEvent::BackEdge(_, target) => {
            if let Some(start) = stack.iter().position(|n| *n == target) {
                let mut cycle: Vec<String> = stack[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(target.to_string());
                cycles.push(cycle);
            }
        }
        _ => {}
    });

    cycles
}

fn detect_circular_dependencies(
    signature: &ArchitectureSignature,
    constraint: &ConstraintDeclaration,
) -> Vec<RawViolation> {
    find_cycles(signature)
        .into_iter()
        .map(|cycle| {
            let mut context = Map::new();
            context.insert("cycle".to_string(), json!(cycle));
            RawViolation {
                constraint_id: constraint.id.clone(),
                description: format!("Circular dependency detected: {}", cycle.join(" → ")),
                location: None,
                context,
                detected_at: now_millis(),
                detail: ViolationDetail::Structural {
                    structural_type: StructuralType::CircularDependency,
                    affected_modules: cycle.clone(),
                    dependency_chain: Some(cycle),
                },
            }
        })
        .collect()
}

fn detect_layer_violations(
    signature: &ArchitectureSignature,
    constraint: &ConstraintDeclaration,
) -> Vec<RawViolation> {
    let structure = &signature.structure;

    // Declared layer membership wins over a module's own layer field.
    let mut module_to_layer: FxHashMap<&str, &str> = structure
        .modules
        .iter()
        .map(|m| (m.name.as_str(), m.layer.as_str()))
        .collect();
    for layer in &structure.layers {
        for module in &layer.modules {
            module_to_layer.insert(module.as_str(), layer.name.as_str());
        }
    }

    let allowed: FxHashMap<&str, (&[String], FxHashSet<&str>)> = structure
        .layers
        .iter()
        .map(|l| {
            let set: FxHashSet<&str> = l.allowed_dependencies.iter().map(String::as_str).collect();
            (l.name.as_str(), (l.allowed_dependencies.as_slice(), set))
        })
        .collect();

    let mut violations = Vec::new();
    for edge in &structure.dependency_graph.edges {
        let (Some(from_layer), Some(to_layer)) = (
            module_to_layer.get(edge.from.as_str()).copied(),
            module_to_layer.get(edge.to.as_str()).copied(),
        ) else {
            continue;
        };
        if from_layer == to_layer {
            continue;
        }
        let Some((allowed_list, allowed_set)) = allowed.get(from_layer) else {
            continue;
        };
        if allowed_set.contains(to_layer) {
            continue;
        }

        let mut context = Map::new();
        context.insert("fromLayer".to_string(), json!(from_layer));
        context.insert("toLayer".to_string(), json!(to_layer));
        context.insert("allowedDependencies".to_string(), json!(allowed_list));

        violations.push(RawViolation {
            constraint_id: constraint.id.clone(),
            description: format!("Layer violation: {from_layer} layer cannot depend on {to_layer} layer"),
            location: None,
            context,
            detected_at: now_millis(),
            detail: ViolationDetail::Structural {
                structural_type: StructuralType::LayerViolation,
                affected_modules: vec![edge.from.clone(), edge.to.clone()],
                dependency_chain: None,
            },
        });
    }
    violations
}
