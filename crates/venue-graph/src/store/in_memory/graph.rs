//! Parent-index queries using petgraph.

use crate::domain::{Venue, VenueId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Collect every venue whose parent is one of `parent_ids`.
///
/// Edges run child -> parent, so children are the sources of incoming edges.
/// Results are grouped by parent in input order and sorted by ID within each
/// parent; duplicate parent IDs are queried once. IDs with no node (never
/// seen) contribute nothing.
pub(super) fn children_of(
    graph: &DiGraph<VenueId, ()>,
    node_map: &HashMap<VenueId, NodeIndex>,
    venues: &HashMap<VenueId, Venue>,
    parent_ids: &[VenueId],
) -> Vec<Venue> {
    let mut seen_parents = HashSet::new();
    let mut result = Vec::new();

    for parent_id in parent_ids {
        if !seen_parents.insert(parent_id) {
            continue;
        }
        let Some(&node) = node_map.get(parent_id) else {
            continue;
        };

        let mut children: Vec<&Venue> = graph
            .edges_directed(node, Direction::Incoming)
            .filter_map(|edge| venues.get(&graph[edge.source()]))
            .collect();
        children.sort_by(|a, b| a.id.cmp(&b.id));
        result.extend(children.into_iter().cloned());
    }

    result
}
