//! Implementation of the `init` command.
//!
//! Creates the `.venue-graph/` directory with a configuration file and an
//! empty venues data file.

use crate::config::{
    CONFIG_FILE_NAME, VENUE_GRAPH_DIR_NAME, VENUES_FILE_NAME, VenueGraphConfig,
};
use crate::error::{ConfigError, Result};
use crate::store::DEFAULT_MAX_BATCH_SIZE;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created `.venue-graph` directory
    pub venue_graph_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created venues file
    pub venues_file: PathBuf,
    /// The configured membership-query limit
    pub max_batch_size: usize,
}

/// Initialize venue-graph in the given directory.
///
/// # Errors
///
/// Returns an error if:
/// - `.venue-graph/` already exists
/// - `max_batch_size` is zero
/// - File system operations fail
pub async fn init(base_dir: &Path, max_batch_size: Option<usize>) -> Result<InitResult> {
    let max_batch_size = max_batch_size.unwrap_or(DEFAULT_MAX_BATCH_SIZE);
    let config = VenueGraphConfig::new(max_batch_size);
    config.store_config()?;

    let venue_graph_dir = base_dir.join(VENUE_GRAPH_DIR_NAME);
    if venue_graph_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(venue_graph_dir).into());
    }

    fs::create_dir_all(&venue_graph_dir).await?;

    let config_file = venue_graph_dir.join(CONFIG_FILE_NAME);
    config.save(&config_file).await?;

    let venues_file = venue_graph_dir.join(VENUES_FILE_NAME);
    fs::write(&venues_file, "").await?;

    tracing::debug!(dir = %venue_graph_dir.display(), max_batch_size, "Initialized venue-graph");

    Ok(InitResult {
        venue_graph_dir,
        config_file,
        venues_file,
        max_batch_size,
    })
}
