//! Caching decorator for venue stores.

use super::{StoreResult, VenueStore};
use crate::domain::{Venue, VenueId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Wrapper that memoizes point lookups on any [`VenueStore`].
///
/// Both hits and misses are remembered until [`invalidate`](Self::invalidate)
/// or [`clear`](Self::clear). Membership queries always go to the inner
/// store. Failed lookups are not cached.
///
/// The lock is released while the inner store is queried, so two concurrent
/// misses on the same ID may both reach the inner store.
pub struct CachedVenueStore<S> {
    inner: S,
    cache: Mutex<HashMap<VenueId, Option<Venue>>>,
}

impl<S: VenueStore> CachedVenueStore<S> {
    /// Wrap a store.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a reference to the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Forget a single cached lookup.
    pub async fn invalidate(&self, id: &VenueId) {
        self.cache.lock().await.remove(id);
    }

    /// Forget every cached lookup.
    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }

    /// Number of cached lookups (hits and misses).
    pub async fn cached_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[async_trait]
impl<S: VenueStore> VenueStore for CachedVenueStore<S> {
    async fn get_venue(&self, id: &VenueId) -> StoreResult<Option<Venue>> {
        if let Some(cached) = self.cache.lock().await.get(id) {
            tracing::trace!(venue_id = %id, "Venue cache hit");
            return Ok(cached.clone());
        }

        let venue = self.inner.get_venue(id).await?;
        self.cache.lock().await.insert(id.clone(), venue.clone());
        Ok(venue)
    }

    async fn get_venues_where_parent_in(&self, ids: &[VenueId]) -> StoreResult<Vec<Venue>> {
        self.inner.get_venues_where_parent_in(ids).await
    }

    fn max_batch_size(&self) -> usize {
        self.inner.max_batch_size()
    }
}
