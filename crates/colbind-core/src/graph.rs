use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::schema::{ClassDecl, TypeGraph};

/// Summary of the inheritance graph structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchySummary {
    pub nodes: usize,
    pub edges: usize,
}

/// Report for supertype-first ordering of a type graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyReport {
    pub summary: HierarchySummary,
    pub topo_order: Option<Vec<String>>,
    pub cycle: Option<Vec<String>>,
}

/// Build a deterministic inheritance report for a type graph.
///
/// Supertypes that are not declared in the graph appear as leaf nodes.
pub fn build_hierarchy_report(graph: &TypeGraph) -> HierarchyReport {
    let adjacency = build_adjacency(graph);
    let nodes = adjacency.len();
    let edges = adjacency.values().map(|targets| targets.len()).sum();
    let summary = HierarchySummary { nodes, edges };

    match toposort(&adjacency) {
        Ok(order) => HierarchyReport {
            summary,
            topo_order: Some(order),
            cycle: None,
        },
        Err(cycle) => HierarchyReport {
            summary,
            topo_order: None,
            cycle: Some(cycle),
        },
    }
}

fn build_adjacency(graph: &TypeGraph) -> BTreeMap<String, BTreeSet<String>> {
    let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for class in &graph.classes {
        adjacency.entry(class.name.clone()).or_default();

        for supertype in class.supertypes() {
            adjacency
                .entry(supertype.to_string())
                .or_default()
                .insert(class.name.clone());
        }
    }

    adjacency
}

fn toposort(graph: &BTreeMap<String, BTreeSet<String>>) -> Result<Vec<String>, Vec<String>> {
    let mut indegree: BTreeMap<String, usize> = BTreeMap::new();

    for node in graph.keys() {
        indegree.entry(node.clone()).or_insert(0);
    }

    for targets in graph.values() {
        for target in targets {
            *indegree.entry(target.clone()).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<String> = indegree
        .iter()
        .filter_map(|(node, count)| if *count == 0 { Some(node.clone()) } else { None })
        .collect();

    let mut order = Vec::with_capacity(graph.len());

    while let Some(node) = ready.pop_first() {
        if let Some(targets) = graph.get(&node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(target.clone());
                    }
                }
            }
        }
        order.push(node);
    }

    if order.len() == graph.len() {
        Ok(order)
    } else {
        let cycle_nodes: Vec<String> = indegree
            .into_iter()
            .filter_map(|(node, count)| if count > 0 { Some(node) } else { None })
            .collect();
        Err(cycle_nodes)
    }
}

/// Name lookup and subtype queries over a type graph.
#[derive(Debug, Clone)]
pub struct TypeIndex<'g> {
    classes: HashMap<&'g str, &'g ClassDecl>,
}

impl<'g> TypeIndex<'g> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        let classes = graph
            .classes
            .iter()
            .map(|class| (class.name.as_str(), class))
            .collect();
        Self { classes }
    }

    pub fn get(&self, name: &str) -> Option<&'g ClassDecl> {
        self.classes.get(name).copied()
    }

    /// True when `sub` is `sup` or reaches it through superclasses or interfaces.
    ///
    /// Names not declared in the graph are opaque and only match themselves.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        let mut pending = vec![sub];
        let mut seen = HashSet::new();

        while let Some(name) = pending.pop() {
            if name == sup {
                return true;
            }
            if !seen.insert(name) {
                continue;
            }
            if let Some(class) = self.get(name) {
                pending.extend(class.supertypes());
            }
        }

        false
    }
}
