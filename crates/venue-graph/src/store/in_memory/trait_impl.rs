//! `VenueStore` implementation for the in-memory store.

use super::InMemoryVenueStore;
use super::graph::children_of;
use crate::domain::{Venue, VenueId};
use crate::error::StoreError;
use crate::store::{StoreResult, VenueStore};
use async_trait::async_trait;

#[async_trait]
impl VenueStore for InMemoryVenueStore {
    async fn get_venue(&self, id: &VenueId) -> StoreResult<Option<Venue>> {
        let inner = self.inner.lock().await;
        Ok(inner.venues.get(id).cloned())
    }

    async fn get_venues_where_parent_in(&self, ids: &[VenueId]) -> StoreResult<Vec<Venue>> {
        let max = self.config.max_batch_size();
        if ids.len() > max {
            return Err(StoreError::BatchTooLarge {
                requested: ids.len(),
                max,
            });
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let inner = self.inner.lock().await;
        Ok(children_of(
            &inner.graph,
            &inner.node_map,
            &inner.venues,
            ids,
        ))
    }

    fn max_batch_size(&self) -> usize {
        self.config.max_batch_size()
    }
}
