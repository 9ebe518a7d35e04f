//! Sovereign venue resolution.
//!
//! Venues form a parent-pointer hierarchy. The root reached by following
//! `parentId` upward is the *sovereign* venue; venues reached by following the
//! pointer in reverse are its descendants. [`VenueGraphResolver`] walks the
//! hierarchy through a read-only [`VenueStore`].
//!
//! The store does not guarantee the parent relation is acyclic or shallow.
//! The upward walk carries the ordered list of visited IDs, fails with
//! [`Error::CycleDetected`] on a repeat, and honors an optional depth bound.
//!
//! No state survives a call. Callers that want caching can wrap the store in
//! a [`CachedVenueStore`](crate::store::CachedVenueStore).
//!
//! # Example
//!
//! ```no_run
//! use venue_graph::domain::VenueId;
//! use venue_graph::resolver::{SovereignOptions, VenueGraphResolver};
//! use venue_graph::store::{InMemoryVenueStore, StoreConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let store = InMemoryVenueStore::new(StoreConfig::default());
//!     let resolver = VenueGraphResolver::new(&store);
//!
//!     let found = resolver
//!         .resolve_sovereign(&VenueId::new("camp"), SovereignOptions::default())
//!         .await?;
//!     println!("sovereign: {}", found.venue.id);
//!     Ok(())
//! }
//! ```

use crate::domain::{Venue, VenueId};
use crate::error::{Error, Result};
use crate::store::VenueStore;
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::HashSet;

/// Options for [`VenueGraphResolver::resolve_sovereign`].
#[derive(Debug, Clone, Default)]
pub struct SovereignOptions {
    /// IDs already visited in this traversal, in visitation order.
    ///
    /// Normally empty; set it to continue a walk started elsewhere.
    pub previously_checked_venue_ids: Vec<VenueId>,

    /// Maximum number of ancestor hops. `None` leaves the walk bounded only
    /// by cycle detection.
    pub max_depth: Option<usize>,
}

impl SovereignOptions {
    /// Options with a depth bound and nothing pre-checked.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            previously_checked_venue_ids: Vec::new(),
            max_depth: Some(max_depth),
        }
    }
}

/// Result of a sovereign lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SovereignVenue {
    /// The root venue
    pub venue: Venue,

    /// Venues walked through on the way up, starting venue first.
    /// Empty when the starting venue is itself sovereign.
    pub checked_venue_ids: Vec<VenueId>,
}

/// Read-only traversals over a venue hierarchy.
#[derive(Clone, Copy)]
pub struct VenueGraphResolver<'a> {
    store: &'a dyn VenueStore,
}

impl std::fmt::Debug for VenueGraphResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VenueGraphResolver")
            .field("store", &"<dyn VenueStore>")
            .field("max_batch_size", &self.store.max_batch_size())
            .finish()
    }
}

impl<'a> VenueGraphResolver<'a> {
    /// Create a resolver over a store.
    pub fn new(store: &'a dyn VenueStore) -> Self {
        Self { store }
    }

    /// Point lookup.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if the store fails.
    pub async fn fetch_venue(&self, venue_id: &VenueId) -> Result<Option<Venue>> {
        Ok(self.store.get_venue(venue_id).await?)
    }

    /// Walk parent pointers from `venue_id` to the sovereign venue.
    ///
    /// Each step fetches the current venue and then, in order: returns it if
    /// it has no parent; fails if its ID was already checked; fails if the
    /// depth bound is exhausted; otherwise records it and moves to the parent.
    ///
    /// For a chain `A -> B -> C -> root` the result is `root` with
    /// `checked_venue_ids = [A, B, C]`.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` if the starting venue, or any ancestor it names,
    ///   doesn't exist
    /// - `Error::CycleDetected` if the chain revisits an ID
    /// - `Error::DepthExceeded` if `max_depth` hops are used up first
    /// - `Error::StoreUnavailable` if the store fails
    pub async fn resolve_sovereign(
        &self,
        venue_id: &VenueId,
        options: SovereignOptions,
    ) -> Result<SovereignVenue> {
        let SovereignOptions {
            previously_checked_venue_ids: mut checked,
            max_depth,
        } = options;
        let mut seen: HashSet<VenueId> = checked.iter().cloned().collect();
        let mut remaining = max_depth;
        let mut current = venue_id.clone();

        loop {
            let venue = self
                .store
                .get_venue(&current)
                .await?
                .ok_or_else(|| Error::NotFound(current.clone()))?;

            let Some(parent) = venue.parent().cloned() else {
                tracing::debug!(
                    start = %venue_id,
                    sovereign = %venue.id,
                    hops = checked.len(),
                    "Resolved sovereign venue"
                );
                return Ok(SovereignVenue {
                    venue,
                    checked_venue_ids: checked,
                });
            };

            if seen.contains(&current) {
                return Err(Error::CycleDetected {
                    venue_id: current,
                    path: checked,
                });
            }

            if remaining == Some(0) {
                return Err(Error::DepthExceeded {
                    max_depth: max_depth.unwrap_or_default(),
                    checked,
                });
            }
            remaining = remaining.map(|depth| depth - 1);

            tracing::trace!(venue_id = %current, parent_id = %parent, "Following parent pointer");
            seen.insert(current.clone());
            checked.push(current);
            current = parent;
        }
    }

    /// Fetch every venue whose parent is one of `venue_ids`.
    ///
    /// The IDs are split into batches of at most
    /// [`VenueStore::max_batch_size`]; batches are queried concurrently and
    /// the results concatenated in batch order. IDs that match nothing are
    /// skipped silently. An empty input returns an empty result without
    /// touching the store.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if any batch fails.
    pub async fn fetch_direct_children(&self, venue_ids: &[VenueId]) -> Result<Vec<Venue>> {
        if venue_ids.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.store.max_batch_size().max(1);
        let batches = venue_ids.chunks(batch_size);
        tracing::debug!(
            ids = venue_ids.len(),
            batches = batches.len(),
            batch_size,
            "Fetching direct children"
        );

        let results = try_join_all(
            batches.map(|batch| self.store.get_venues_where_parent_in(batch)),
        )
        .await?;

        Ok(results.into_iter().flatten().collect())
    }

    /// Single-ID form of [`fetch_direct_children`](Self::fetch_direct_children).
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if the store fails.
    pub async fn fetch_direct_children_of(&self, venue_id: &VenueId) -> Result<Vec<Venue>> {
        self.fetch_direct_children(std::slice::from_ref(venue_id))
            .await
    }

    /// Children followed by grandchildren of `venue_id`.
    ///
    /// This stops at two levels on purpose; deeper venues are not returned.
    /// See [`fetch_descendant_closure`](Self::fetch_descendant_closure) for a
    /// full walk.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if the store fails.
    pub async fn fetch_descendants(&self, venue_id: &VenueId) -> Result<Vec<Venue>> {
        let children = self.fetch_direct_children_of(venue_id).await?;
        let child_ids: Vec<VenueId> = children.iter().map(|child| child.id.clone()).collect();
        let grandchildren = self.fetch_direct_children(&child_ids).await?;

        let mut descendants = children;
        descendants.extend(grandchildren);
        Ok(descendants)
    }

    /// The sovereign of `venue_id` followed by its two-level descendants.
    ///
    /// # Errors
    ///
    /// Any error from [`resolve_sovereign`](Self::resolve_sovereign) or
    /// [`fetch_descendants`](Self::fetch_descendants).
    pub async fn fetch_related(&self, venue_id: &VenueId) -> Result<Vec<Venue>> {
        let SovereignVenue { venue, .. } = self
            .resolve_sovereign(venue_id, SovereignOptions::default())
            .await?;
        let descendants = self.fetch_descendants(&venue.id).await?;

        let mut related = Vec::with_capacity(descendants.len() + 1);
        related.push(venue);
        related.extend(descendants);
        Ok(related)
    }

    /// Breadth-first transitive descendants of `venue_id`.
    ///
    /// Walks one level at a time (each level is one batched
    /// [`fetch_direct_children`](Self::fetch_direct_children)) until a level
    /// comes back empty or `max_levels` levels have been read. Every venue is
    /// returned at most once, and the starting venue is never returned, so
    /// cycles in the parent relation terminate the walk.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if the store fails.
    pub async fn fetch_descendant_closure(
        &self,
        venue_id: &VenueId,
        max_levels: Option<usize>,
    ) -> Result<Vec<Venue>> {
        let mut visited: HashSet<VenueId> = HashSet::from([venue_id.clone()]);
        let mut frontier = vec![venue_id.clone()];
        let mut result = Vec::new();
        let mut level = 0;

        while !frontier.is_empty() {
            if max_levels.is_some_and(|max| level >= max) {
                break;
            }
            level += 1;

            let children = self.fetch_direct_children(&frontier).await?;
            frontier = Vec::new();
            for child in children {
                if visited.insert(child.id.clone()) {
                    frontier.push(child.id.clone());
                    result.push(child);
                }
            }
            tracing::trace!(level, found = frontier.len(), "Descendant level");
        }

        Ok(result)
    }

    /// The sovereign of `venue_id` followed by all of its descendants.
    ///
    /// # Errors
    ///
    /// Any error from [`resolve_sovereign`](Self::resolve_sovereign) or
    /// [`fetch_descendant_closure`](Self::fetch_descendant_closure).
    pub async fn fetch_related_transitive(&self, venue_id: &VenueId) -> Result<Vec<Venue>> {
        let SovereignVenue { venue, .. } = self
            .resolve_sovereign(venue_id, SovereignOptions::default())
            .await?;
        let descendants = self.fetch_descendant_closure(&venue.id, None).await?;

        let mut related = Vec::with_capacity(descendants.len() + 1);
        related.push(venue);
        related.extend(descendants);
        Ok(related)
    }
}
