//! In-memory venue store backed by `HashMap` and petgraph.
//!
//! All records live in RAM. The store can be seeded programmatically or
//! loaded from a JSONL file via [`load_from_jsonl`], and written back with
//! [`save_to_jsonl`].
//!
//! # Architecture
//!
//! - `HashMap<VenueId, Venue>` for O(1) point lookups
//! - `petgraph::DiGraph` as a parent index for membership queries
//! - `HashMap<VenueId, NodeIndex>` mapping venue IDs to graph nodes
//!
//! ## Edge Direction Convention
//!
//! Edges point from **child to parent**, mirroring the `parentId` pointer.
//! The children of a venue are therefore the sources of its *incoming*
//! edges.
//!
//! A venue may name a parent that doesn't exist (deleted, or not yet
//! imported). A placeholder node is created for such an ID so that a later
//! membership query on it still finds the orphaned child, the same way a
//! document store matches on the raw field value.
//!
//! The store does **not** reject cycles in the parent relation. Detecting
//! them is the resolver's job.
//!
//! # Thread Safety
//!
//! The inner state is wrapped in `Arc<tokio::sync::Mutex<_>>`; clones of
//! [`InMemoryVenueStore`] share the same data.

mod graph;
mod inner;
mod jsonl;
mod trait_impl;

use super::StoreConfig;
use crate::domain::{Venue, VenueId};
use inner::InMemoryStoreInner;
use std::sync::Arc;
use tokio::sync::Mutex;

pub use jsonl::{LoadWarning, load_from_jsonl, save_to_jsonl};

/// Thread-safe in-memory venue store.
///
/// Implements [`VenueStore`](crate::store::VenueStore) for reads; the write
/// helpers here exist for seeding, imports and tests.
#[derive(Clone)]
pub struct InMemoryVenueStore {
    inner: Arc<Mutex<InMemoryStoreInner>>,
    config: StoreConfig,
}

impl std::fmt::Debug for InMemoryVenueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryVenueStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl InMemoryVenueStore {
    /// Create an empty store.
    ///
    /// # Example
    ///
    /// ```
    /// use venue_graph::store::{InMemoryVenueStore, StoreConfig};
    ///
    /// let store = InMemoryVenueStore::new(StoreConfig::default());
    /// ```
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(InMemoryStoreInner::new())),
            config,
        }
    }

    /// The store's configuration.
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Insert or replace a venue, returning the previous record if any.
    pub async fn insert(&self, venue: Venue) -> Option<Venue> {
        self.inner.lock().await.insert(venue)
    }

    /// Insert or replace many venues, returning how many were written.
    pub async fn import_venues(&self, venues: impl IntoIterator<Item = Venue>) -> usize {
        let mut inner = self.inner.lock().await;
        let mut count = 0;
        for venue in venues {
            inner.insert(venue);
            count += 1;
        }
        count
    }

    /// Remove a venue. Children that point at it are left in place.
    pub async fn remove(&self, id: &VenueId) -> Option<Venue> {
        self.inner.lock().await.remove(id)
    }

    /// All venues, sorted by ID.
    pub async fn export_all(&self) -> Vec<Venue> {
        let inner = self.inner.lock().await;
        let mut venues: Vec<Venue> = inner.venues.values().cloned().collect();
        venues.sort_by(|a, b| a.id.cmp(&b.id));
        venues
    }

    /// Number of stored venues.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.venues.len()
    }

    /// Returns `true` if the store holds no venues.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
