//! Cyclic lineage detection using petgraph.
//!
//! The generation counter stops at the first cycle it meets. This module finds
//! all of them at once so an operator can repair the data in one pass.

use std::collections::HashMap;

use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::debug;

use super::FamilyGraph;
use crate::types::PersonId;

/// A set of persons who are each other's descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// Persons in the cycle, id-ascending
    pub persons: Vec<PersonId>,
}

/// Find every cyclic lineage in the graph.
///
/// Edges run parent → child for every family, using the raw family rows, so
/// this works whether or not links have been resolved. Ids that do not name a
/// loaded person are ignored. Each strongly connected component with more than
/// one person, or a single person listed as their own child, is one cycle.
#[must_use]
pub fn find_cycles(graph: &FamilyGraph) -> Vec<Cycle> {
    let mut lineage: DiGraph<PersonId, ()> = DiGraph::new();
    let node_map: HashMap<PersonId, NodeIndex> = graph
        .persons()
        .map(|person| (person.id, lineage.add_node(person.id)))
        .collect();

    for family in graph.families() {
        for parent in family.parents() {
            let Some(&from) = node_map.get(&parent) else {
                continue;
            };
            for child in &family.children {
                if let Some(&to) = node_map.get(child) {
                    lineage.update_edge(from, to, ());
                }
            }
        }
    }

    debug!(
        node_count = lineage.node_count(),
        edge_count = lineage.edge_count(),
        "Searching lineage graph for cycles"
    );

    let mut cycles: Vec<Cycle> = algo::tarjan_scc(&lineage)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => lineage.contains_edge(*single, *single),
            other => other.len() > 1,
        })
        .map(|component| {
            let mut persons: Vec<PersonId> = component.iter().map(|&n| lineage[n]).collect();
            persons.sort_unstable();
            Cycle { persons }
        })
        .collect();

    cycles.sort_by(|a, b| a.persons.cmp(&b.persons));
    cycles
}
