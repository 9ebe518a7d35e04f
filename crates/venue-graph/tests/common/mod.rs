//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::Mutex;
use venue_graph::domain::{Venue, VenueId};
use venue_graph::error::StoreError;
use venue_graph::store::{InMemoryVenueStore, StoreConfig, StoreResult, VenueStore};

/// Build a venue with an optional parent.
pub fn venue(id: &str, parent: Option<&str>) -> Venue {
    Venue::new(id, parent.map(VenueId::from))
}

/// Collect venue IDs as string slices for easy comparison.
pub fn ids(venues: &[Venue]) -> Vec<&str> {
    venues.iter().map(|v| v.id.as_str()).collect()
}

/// Store that answers from memory and records every membership query.
pub struct RecordingStore {
    store: InMemoryVenueStore,
    batches: Mutex<Vec<Vec<VenueId>>>,
    lookups: Mutex<Vec<VenueId>>,
    fail: bool,
}

impl RecordingStore {
    pub async fn new(max_batch_size: usize, venues: Vec<Venue>) -> Self {
        let store = InMemoryVenueStore::new(StoreConfig::new(max_batch_size).unwrap());
        store.import_venues(venues).await;
        Self {
            store,
            batches: Mutex::new(Vec::new()),
            lookups: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A store whose every query fails as unavailable.
    pub async fn unavailable() -> Self {
        let mut store = Self::new(10, Vec::new()).await;
        store.fail = true;
        store
    }

    pub fn batches(&self) -> Vec<Vec<VenueId>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<VenueId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl VenueStore for RecordingStore {
    async fn get_venue(&self, id: &VenueId) -> StoreResult<Option<Venue>> {
        self.lookups.lock().unwrap().push(id.clone());
        if self.fail {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.store.get_venue(id).await
    }

    async fn get_venues_where_parent_in(&self, ids: &[VenueId]) -> StoreResult<Vec<Venue>> {
        self.batches.lock().unwrap().push(ids.to_vec());
        if self.fail {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.store.get_venues_where_parent_in(ids).await
    }

    fn max_batch_size(&self) -> usize {
        self.store.max_batch_size()
    }
}

/// Run the venue-graph binary in the specified directory with colors off.
pub fn run_venue_graph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_venue-graph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("VENUE_GRAPH_ASCII", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute venue-graph binary")
}
