//! Core in-memory store data structures.
//!
//! This module contains the inner structure that holds all venue records
//! and is wrapped in `Arc<Mutex<>>` for thread safety.

use crate::domain::{Venue, VenueId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Inner store structure (not thread-safe).
///
/// # Graph Representation
///
/// Edges run from child to parent. Nodes are never removed from the graph:
/// petgraph's `remove_node` reindexes the last node, and an ID that loses its
/// record may still be named as a parent by other venues.
pub(crate) struct InMemoryStoreInner {
    /// Venues indexed by ID for O(1) lookups
    pub(super) venues: HashMap<VenueId, Venue>,

    /// Parent index. Node weights are venue IDs, edges carry no data.
    pub(super) graph: DiGraph<VenueId, ()>,

    /// Mapping from VenueId to graph NodeIndex.
    ///
    /// Every venue in `venues` and every ID named as a parent has an entry.
    pub(super) node_map: HashMap<VenueId, NodeIndex>,
}

impl InMemoryStoreInner {
    /// Create a new empty instance
    pub(crate) fn new() -> Self {
        Self {
            venues: HashMap::new(),
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Look up the node for an ID, creating a placeholder if needed.
    fn node_for(&mut self, id: &VenueId) -> NodeIndex {
        if let Some(&node) = self.node_map.get(id) {
            return node;
        }
        let node = self.graph.add_node(id.clone());
        self.node_map.insert(id.clone(), node);
        node
    }

    /// Drop the parent edge leaving `node`, if any.
    ///
    /// `remove_edge` swaps the last edge into the freed slot, so edge indices
    /// are re-read after every removal.
    fn detach(&mut self, node: NodeIndex) {
        while let Some(edge) = self.graph.edges(node).next().map(|edge| edge.id()) {
            self.graph.remove_edge(edge);
        }
    }

    /// Insert or replace a venue and re-point its parent edge.
    pub(crate) fn insert(&mut self, venue: Venue) -> Option<Venue> {
        let node = self.node_for(&venue.id);
        self.detach(node);

        if let Some(parent) = venue.parent().cloned() {
            let parent_node = self.node_for(&parent);
            self.graph.add_edge(node, parent_node, ());
        }

        self.venues.insert(venue.id.clone(), venue)
    }

    /// Remove a venue record and its parent edge. The node stays.
    pub(crate) fn remove(&mut self, id: &VenueId) -> Option<Venue> {
        let removed = self.venues.remove(id)?;
        if let Some(&node) = self.node_map.get(id) {
            self.detach(node);
        }
        Some(removed)
    }
}
