//! Configuration management for venue-graph.
//!
//! Configuration lives in `.venue-graph/config.yaml` and is discovered by
//! searching up from the working directory:
//!
//! ```yaml
//! storage:
//!   backend: jsonl
//!   data-file: .venue-graph/venues.jsonl
//! max-batch-size: 10
//! max-depth: 50
//! ```

use crate::error::{ConfigError, Result};
use crate::store::{DEFAULT_MAX_BATCH_SIZE, StoreBackend, StoreConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the venue-graph directory
pub const VENUE_GRAPH_DIR_NAME: &str = ".venue-graph";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the venues data file
pub const VENUES_FILE_NAME: &str = "venues.jsonl";

/// Maximum directory depth to traverse when searching for the config root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct VenueGraphConfig {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Membership-query limit of the backing store
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Default ancestor bound for sovereign lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Storage backend type ("jsonl" or "memory")
    pub backend: String,

    /// Path to the data file, relative to the root directory
    pub data_file: String,
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

impl VenueGraphConfig {
    /// Create a configuration with the given batch limit
    pub fn new(max_batch_size: usize) -> Self {
        Self {
            storage: StorageConfig {
                backend: "jsonl".to_string(),
                data_file: format!("{}/{}", VENUE_GRAPH_DIR_NAME, VENUES_FILE_NAME),
            },
            max_batch_size,
            max_depth: None,
        }
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file can't be read, or `ConfigError::Parse`
    /// if the YAML is invalid.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.store_config()?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file can't be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("YAML error: {}", e)))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Store tuning derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBatchSize` if `max-batch-size` is zero.
    pub fn store_config(&self) -> std::result::Result<StoreConfig, ConfigError> {
        StoreConfig::new(self.max_batch_size)
    }
}

impl Default for VenueGraphConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BATCH_SIZE)
    }
}

impl StorageConfig {
    /// Resolve this section into a store backend.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownBackend` for unrecognized backend names.
    pub fn to_backend(&self, root_dir: &Path) -> std::result::Result<StoreBackend, ConfigError> {
        match self.backend.as_str() {
            "jsonl" => Ok(StoreBackend::Jsonl(root_dir.join(&self.data_file))),
            "memory" => Ok(StoreBackend::InMemory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Find the directory containing `.venue-graph/` by searching upward.
///
/// Returns `None` if none is found before the filesystem root or
/// [`MAX_TRAVERSAL_DEPTH`] levels.
pub fn find_venue_graph_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(VENUE_GRAPH_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rstest::rstest;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let mut config = VenueGraphConfig::new(30);
        config.max_depth = Some(5);
        config.save(&path).await.unwrap();

        let loaded = VenueGraphConfig::load(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_load_uses_kebab_case_and_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "storage:\n  backend: memory\n  data-file: venues.jsonl\n",
        )
        .unwrap();

        let loaded = VenueGraphConfig::load(&path).await.unwrap();
        assert_eq!(loaded.max_batch_size, DEFAULT_MAX_BATCH_SIZE);
        assert_eq!(loaded.max_depth, None);
        assert_eq!(loaded.storage.backend, "memory");
    }

    #[tokio::test]
    async fn test_load_rejects_zero_batch_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "storage:\n  backend: jsonl\n  data-file: v.jsonl\nmax-batch-size: 0\n",
        )
        .unwrap();

        let err = VenueGraphConfig::load(&path).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidBatchSize(0))
        ));
    }

    #[tokio::test]
    async fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "storage: [unclosed").unwrap();

        let err = VenueGraphConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[rstest]
    #[case::jsonl("jsonl", true)]
    #[case::memory("memory", true)]
    #[case::postgres("postgres", false)]
    fn test_to_backend(#[case] backend: &str, #[case] ok: bool) {
        let storage = StorageConfig {
            backend: backend.to_string(),
            data_file: "data/venues.jsonl".to_string(),
        };
        let result = storage.to_backend(Path::new("/project"));
        assert_eq!(result.is_ok(), ok);
        if backend == "jsonl" {
            assert_eq!(
                result.unwrap(),
                StoreBackend::Jsonl(PathBuf::from("/project/data/venues.jsonl"))
            );
        }
    }

    #[test]
    fn test_find_root_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join(VENUE_GRAPH_DIR_NAME)).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_venue_graph_root(&nested),
            Some(temp_dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_find_root_missing() {
        let temp_dir = TempDir::new().unwrap();
        // Assumes no .venue-graph above the system temp dir.
        assert!(find_venue_graph_root(temp_dir.path()).is_none());
    }
}
