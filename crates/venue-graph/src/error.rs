//! Error types for venue-graph operations.

use crate::domain::VenueId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for venue-graph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested venue does not exist in the store.
    #[error("{0} does not exist")]
    NotFound(VenueId),

    /// The ancestor chain revisits a venue that was already checked.
    #[error(
        "Circular reference detected: '{venue_id}' has already been checked (path: {})",
        format_path(.path)
    )]
    CycleDetected {
        /// The venue that was reached a second time
        venue_id: VenueId,
        /// The venues checked before the repeat, in visitation order
        path: Vec<VenueId>,
    },

    /// The caller's depth bound ran out before a sovereign venue was found.
    #[error(
        "Maximum depth of {max_depth} reached before finding the sovereign venue (path: {})",
        format_path(.checked)
    )]
    DepthExceeded {
        /// The bound the caller asked for
        max_depth: usize,
        /// The venues checked before giving up, in visitation order
        checked: Vec<VenueId>,
    },

    /// The backing store failed; propagated without retry.
    #[error("Venue store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error outside of the store (config files, init).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failures raised by a [`VenueStore`](crate::store::VenueStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error while reading or writing the backing file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing data is not in the expected format.
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// A membership query exceeded the store's cardinality limit.
    #[error("Membership query of {requested} ids exceeds the store limit of {max}")]
    BatchTooLarge {
        /// Number of ids in the rejected query
        requested: usize,
        /// The store's limit
        max: usize,
    },

    /// The store could not be reached (network, timeout, ...).
    #[error("{0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.venue-graph` directory was found.
    #[error("Not a venue-graph directory (or any parent). Run 'venue-graph init' first.")]
    NotInitialized,

    /// `init` was run where a configuration already exists.
    #[error("venue-graph is already initialized. Found existing '{}'", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The membership-query batch size must be positive.
    #[error("max-batch-size must be greater than zero (got {0})")]
    InvalidBatchSize(usize),

    /// Unrecognized storage backend name.
    #[error("Unknown storage backend '{0}'. Valid values: jsonl, memory")]
    UnknownBackend(String),

    /// The configured backend has no data file to write imports to.
    #[error("The memory backend cannot persist imports; set storage.backend to jsonl")]
    NotPersistent,

    /// The configuration file could not be parsed or written.
    #[error("Configuration error: {0}")]
    Parse(String),
}

fn format_path(path: &[VenueId]) -> String {
    if path.is_empty() {
        return "<empty>".to_string();
    }
    path.iter()
        .map(VenueId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A specialized Result type for venue-graph operations.
pub type Result<T> = std::result::Result<T, Error>;
