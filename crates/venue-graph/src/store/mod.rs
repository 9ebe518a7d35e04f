//! Venue store abstraction.
//!
//! The resolver only ever reads from a store, through two queries: a point
//! lookup by venue ID and a membership query on the parent pointer. This
//! module defines that capability as the [`VenueStore`] trait and provides:
//!
//! - **In-memory**: `HashMap` records plus a petgraph parent index
//! - **JSONL**: the in-memory store loaded from (and saved to) a JSON Lines file
//! - **Caching**: [`CachedVenueStore`], a decorator that memoizes point lookups
//!
//! # Batch Limit
//!
//! Document stores typically cap how many values a membership ("in") query
//! may carry. Every store reports its cap through
//! [`VenueStore::max_batch_size`] and rejects larger queries with
//! [`StoreError::BatchTooLarge`]; callers are expected to pre-batch.
//!
//! # Test Utilities
//!
//! [`MockVenueStore`] records every query and can be switched into a failing
//! mode. It is available under `cfg(test)` or with the `test-util` feature:
//!
//! ```toml
//! [dev-dependencies]
//! venue-graph = { version = "...", features = ["test-util"] }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use venue_graph::store::{create_store, StoreBackend, StoreConfig};
//! use venue_graph::domain::VenueId;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = StoreBackend::Jsonl("venues.jsonl".into());
//!     let store = create_store(backend, StoreConfig::default()).await?;
//!
//!     if let Some(venue) = store.get_venue(&VenueId::new("camp")).await? {
//!         println!("parent: {:?}", venue.parent());
//!     }
//!     Ok(())
//! }
//! ```

use crate::domain::{Venue, VenueId};
use crate::error::{ConfigError, StoreError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cached;
pub mod in_memory;

pub use cached::CachedVenueStore;
pub use in_memory::{InMemoryVenueStore, LoadWarning};

/// Result type for store-level operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Membership-query limit used when none is configured.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10;

/// Read capability over the venue collection.
///
/// Implementations must be `Send + Sync`; the resolver issues independent
/// membership queries concurrently against the same store.
///
/// # Errors
///
/// Transient failures (network, timeout) surface as
/// [`StoreError::Unavailable`]. The resolver propagates them unchanged and
/// never retries.
#[async_trait]
pub trait VenueStore: Send + Sync {
    /// Point lookup by identifier.
    ///
    /// Returns `None` if the venue doesn't exist.
    async fn get_venue(&self, id: &VenueId) -> StoreResult<Option<Venue>>;

    /// Return every venue whose parent pointer is one of `ids`.
    ///
    /// Ids that no longer match any venue contribute nothing. Order within
    /// the result is store-defined.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BatchTooLarge`] if `ids` is longer than
    /// [`max_batch_size`](Self::max_batch_size).
    async fn get_venues_where_parent_in(&self, ids: &[VenueId]) -> StoreResult<Vec<Venue>>;

    /// The store-imposed cap on membership query cardinality.
    fn max_batch_size(&self) -> usize;
}

#[async_trait]
impl<S: VenueStore + ?Sized> VenueStore for Box<S> {
    async fn get_venue(&self, id: &VenueId) -> StoreResult<Option<Venue>> {
        (**self).get_venue(id).await
    }

    async fn get_venues_where_parent_in(&self, ids: &[VenueId]) -> StoreResult<Vec<Venue>> {
        (**self).get_venues_where_parent_in(ids).await
    }

    fn max_batch_size(&self) -> usize {
        (**self).max_batch_size()
    }
}

#[async_trait]
impl<S: VenueStore + ?Sized> VenueStore for Arc<S> {
    async fn get_venue(&self, id: &VenueId) -> StoreResult<Option<Venue>> {
        (**self).get_venue(id).await
    }

    async fn get_venues_where_parent_in(&self, ids: &[VenueId]) -> StoreResult<Vec<Venue>> {
        (**self).get_venues_where_parent_in(ids).await
    }

    fn max_batch_size(&self) -> usize {
        (**self).max_batch_size()
    }
}

/// Tuning for a store adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    max_batch_size: usize,
}

impl StoreConfig {
    /// Create a config with the given membership-query limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBatchSize`] if `max_batch_size` is zero.
    pub fn new(max_batch_size: usize) -> Result<Self, ConfigError> {
        if max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(max_batch_size));
        }
        Ok(Self { max_batch_size })
    }

    /// The membership-query limit.
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// Storage backend configuration.
///
/// Determines where venue records are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory storage (ephemeral)
    InMemory,

    /// JSONL file storage (persistent)
    Jsonl(PathBuf),
}

impl StoreBackend {
    /// Returns the data file path for file-based backends.
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StoreBackend::Jsonl(path) => Some(path),
            StoreBackend::InMemory => None,
        }
    }
}

/// Open the in-memory store for a backend, returning any load warnings.
///
/// A JSONL path that doesn't exist yet yields an empty store.
///
/// # Errors
///
/// Returns `StoreError::Io` if the data file exists but cannot be read.
pub async fn open_store(
    backend: &StoreBackend,
    config: StoreConfig,
) -> StoreResult<(InMemoryVenueStore, Vec<LoadWarning>)> {
    match backend {
        StoreBackend::InMemory => Ok((InMemoryVenueStore::new(config), Vec::new())),
        StoreBackend::Jsonl(path) if path.exists() => {
            in_memory::load_from_jsonl(path, config).await
        }
        StoreBackend::Jsonl(path) => {
            tracing::debug!(path = %path.display(), "Data file not found, starting empty");
            Ok((InMemoryVenueStore::new(config), Vec::new()))
        }
    }
}

/// Create a store for the given backend.
///
/// Load warnings are logged and otherwise ignored; the store is still usable.
///
/// # Errors
///
/// Returns `StoreError::Io` if the data file exists but cannot be read.
pub async fn create_store(
    backend: StoreBackend,
    config: StoreConfig,
) -> StoreResult<Box<dyn VenueStore>> {
    let (store, warnings) = open_store(&backend, config).await?;
    for warning in &warnings {
        tracing::warn!(warning = %warning, "JSONL load warning");
    }
    Ok(Box::new(store))
}

// ========== Test Utilities ==========

#[cfg(any(test, feature = "test-util"))]
pub use mock::MockVenueStore;

#[cfg(any(test, feature = "test-util"))]
mod mock {
    use super::{InMemoryVenueStore, StoreConfig, StoreResult, VenueStore};
    use crate::domain::{Venue, VenueId};
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Recording test double for [`VenueStore`].
    ///
    /// Answers queries from an [`InMemoryVenueStore`] while recording every
    /// call. [`set_unavailable`](Self::set_unavailable) makes all later calls
    /// fail with [`StoreError::Unavailable`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use venue_graph::store::MockVenueStore;
    /// use venue_graph::domain::Venue;
    ///
    /// let store = MockVenueStore::with_venues(3, [Venue::new("root", None)]).await;
    /// store.set_unavailable(true);
    /// ```
    pub struct MockVenueStore {
        store: InMemoryVenueStore,
        get_calls: Mutex<Vec<VenueId>>,
        batch_calls: Mutex<Vec<Vec<VenueId>>>,
        unavailable: AtomicBool,
    }

    impl MockVenueStore {
        /// Create an empty mock with the given batch limit.
        ///
        /// # Panics
        ///
        /// Panics if `max_batch_size` is zero.
        pub fn new(max_batch_size: usize) -> Self {
            let config = StoreConfig::new(max_batch_size).expect("batch size must be positive");
            Self {
                store: InMemoryVenueStore::new(config),
                get_calls: Mutex::new(Vec::new()),
                batch_calls: Mutex::new(Vec::new()),
                unavailable: AtomicBool::new(false),
            }
        }

        /// Create a mock pre-seeded with venues.
        pub async fn with_venues(
            max_batch_size: usize,
            venues: impl IntoIterator<Item = Venue>,
        ) -> Self {
            let mock = Self::new(max_batch_size);
            mock.store.import_venues(venues).await;
            mock
        }

        /// The underlying in-memory store, for seeding.
        pub fn inner(&self) -> &InMemoryVenueStore {
            &self.store
        }

        /// Make every subsequent call fail (or succeed again).
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// IDs passed to `get_venue`, in call order.
        pub fn get_calls(&self) -> Vec<VenueId> {
            self.get_calls
                .lock()
                .expect("mock mutex should not be poisoned")
                .clone()
        }

        /// ID batches passed to `get_venues_where_parent_in`, in call order.
        pub fn batch_calls(&self) -> Vec<Vec<VenueId>> {
            self.batch_calls
                .lock()
                .expect("mock mutex should not be poisoned")
                .clone()
        }

        fn check_available(&self) -> StoreResult<()> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable(
                    "mock store is unavailable".to_string(),
                ));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl VenueStore for MockVenueStore {
        async fn get_venue(&self, id: &VenueId) -> StoreResult<Option<Venue>> {
            self.get_calls
                .lock()
                .expect("mock mutex should not be poisoned")
                .push(id.clone());
            self.check_available()?;
            self.store.get_venue(id).await
        }

        async fn get_venues_where_parent_in(&self, ids: &[VenueId]) -> StoreResult<Vec<Venue>> {
            self.batch_calls
                .lock()
                .expect("mock mutex should not be poisoned")
                .push(ids.to_vec());
            self.check_available()?;
            self.store.get_venues_where_parent_in(ids).await
        }

        fn max_batch_size(&self) -> usize {
            self.store.max_batch_size()
        }
    }
}
