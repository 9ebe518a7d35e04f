//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use venue_graph::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let related = app.resolver().fetch_related(&"camp".into()).await?;
//!     println!("{} venues", related.len());
//!     Ok(())
//! }
//! ```

use crate::config::{
    CONFIG_FILE_NAME, VENUE_GRAPH_DIR_NAME, VenueGraphConfig, find_venue_graph_root,
};
use crate::domain::Venue;
use crate::error::{ConfigError, Result};
use crate::resolver::VenueGraphResolver;
use crate::store::in_memory::save_to_jsonl;
use crate::store::{InMemoryVenueStore, StoreBackend, open_store};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Loads configuration and the venue store from the nearest `.venue-graph/`
/// directory.
#[derive(Debug)]
pub struct App {
    store: InMemoryVenueStore,
    backend: StoreBackend,
    config: VenueGraphConfig,
    root_dir: PathBuf,
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No `.venue-graph/` directory is found in the directory tree
    /// - Configuration cannot be loaded
    /// - The data file cannot be read
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_venue_graph_root(working_dir).ok_or(ConfigError::NotInitialized)?;
        let config_path = root_dir.join(VENUE_GRAPH_DIR_NAME).join(CONFIG_FILE_NAME);
        let config = VenueGraphConfig::load(&config_path).await?;

        let backend = config.storage.to_backend(&root_dir)?;
        let (store, warnings) = open_store(&backend, config.store_config()?).await?;
        for warning in &warnings {
            tracing::warn!(warning = %warning, "JSONL load warning");
        }

        Ok(Self {
            store,
            backend,
            config,
            root_dir,
        })
    }

    /// A resolver over the loaded store.
    pub fn resolver(&self) -> VenueGraphResolver<'_> {
        VenueGraphResolver::new(&self.store)
    }

    /// The loaded store.
    pub fn store(&self) -> &InMemoryVenueStore {
        &self.store
    }

    /// The loaded configuration.
    pub fn config(&self) -> &VenueGraphConfig {
        &self.config
    }

    /// The directory containing `.venue-graph/`.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Merge venues into the store and persist them.
    ///
    /// Existing records with the same ID are replaced.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotPersistent` for the memory backend, before
    /// anything is merged, and `Error::StoreUnavailable` if the data file
    /// can't be written.
    pub async fn import(&self, venues: Vec<Venue>) -> Result<usize> {
        let path = self.backend.data_path().ok_or(ConfigError::NotPersistent)?;
        let count = self.store.import_venues(venues).await;
        save_to_jsonl(&self.store, path).await?;
        Ok(count)
    }
}
