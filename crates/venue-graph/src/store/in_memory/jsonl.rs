//! JSONL persistence for the in-memory store.
//!
//! Each line of the file is one serialized [`Venue`]. Loading is resilient:
//! lines that cannot be used are skipped and reported as [`LoadWarning`]s
//! instead of failing the whole load.

use super::InMemoryVenueStore;
use crate::domain::{Venue, VenueId};
use crate::error::StoreError;
use crate::store::{StoreConfig, StoreResult};
use std::collections::HashSet;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

/// Non-fatal problems found while loading a JSONL file.
///
/// Applications should log or report these; they point at data that needs
/// manual repair.
///
/// ```no_run
/// # use venue_graph::store::in_memory::{load_from_jsonl, LoadWarning};
/// # use venue_graph::store::StoreConfig;
/// # use std::path::{Path, PathBuf};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> anyhow::Result<()> {
/// let (store, warnings) =
///     load_from_jsonl(Path::new("venues.jsonl"), StoreConfig::default()).await?;
///
/// for warning in warnings {
///     match warning {
///         LoadWarning::MalformedJson { line_number, error } => {
///             eprintln!("Skipped malformed JSON at line {}: {}", line_number, error);
///         }
///         LoadWarning::InvalidVenue { line_number, error } => {
///             eprintln!("Skipped invalid venue at line {}: {}", line_number, error);
///         }
///         LoadWarning::DuplicateVenue { venue_id, line_number } => {
///             eprintln!("Venue {} redefined at line {}", venue_id, line_number);
///         }
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Line couldn't be parsed as a venue record
    ///
    /// **Effect**: Line is skipped entirely.
    MalformedJson {
        /// 1-based line number
        line_number: usize,
        /// Parser message
        error: String,
    },

    /// Record parsed but failed validation
    ///
    /// **Effect**: Line is skipped entirely.
    InvalidVenue {
        /// 1-based line number
        line_number: usize,
        /// Validation message
        error: String,
    },

    /// The same venue ID appears more than once
    ///
    /// **Effect**: The later record replaces the earlier one.
    DuplicateVenue {
        /// The repeated ID
        venue_id: VenueId,
        /// 1-based line number of the later record
        line_number: usize,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {}: malformed JSON: {}", line_number, error)
            }
            Self::InvalidVenue { line_number, error } => {
                write!(f, "line {}: invalid venue: {}", line_number, error)
            }
            Self::DuplicateVenue {
                venue_id,
                line_number,
            } => write!(
                f,
                "line {}: duplicate venue '{}' replaces earlier record",
                line_number, venue_id
            ),
        }
    }
}

/// Load a store from a JSONL file.
///
/// Blank lines are ignored. Returns the store together with every non-fatal
/// warning encountered.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be opened or read, and
/// `StoreError::InvalidFormat` if it is not UTF-8 text.
pub async fn load_from_jsonl(
    path: &Path,
    config: StoreConfig,
) -> StoreResult<(InMemoryVenueStore, Vec<LoadWarning>)> {
    let file = File::open(path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut warnings = Vec::new();
    let mut seen: HashSet<VenueId> = HashSet::new();
    let mut venues = Vec::new();
    let mut line_number = 0;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(StoreError::InvalidFormat(format!(
                    "{}: line {} is not valid UTF-8",
                    path.display(),
                    line_number + 1
                )));
            }
            Err(e) => return Err(e.into()),
        };
        line_number += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let venue: Venue = match serde_json::from_str(trimmed) {
            Ok(venue) => venue,
            Err(e) => {
                warnings.push(LoadWarning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        if let Err(error) = venue.validate() {
            warnings.push(LoadWarning::InvalidVenue { line_number, error });
            continue;
        }

        if !seen.insert(venue.id.clone()) {
            warnings.push(LoadWarning::DuplicateVenue {
                venue_id: venue.id.clone(),
                line_number,
            });
        }
        venues.push(venue);
    }

    let store = InMemoryVenueStore::new(config);
    let loaded = store.import_venues(venues).await;
    tracing::debug!(
        path = %path.display(),
        venues = loaded,
        warnings = warnings.len(),
        "Loaded venues from JSONL"
    );

    Ok((store, warnings))
}

/// Save a store to a JSONL file.
///
/// Venues are written sorted by ID so repeated saves produce stable diffs.
/// The write goes to a sibling temporary file (the data file name plus
/// `.tmp`) and is renamed into place, so an interrupted save leaves the
/// original file untouched.
///
/// # Errors
///
/// Returns `StoreError::Io` on filesystem failures and `StoreError::Json` if
/// a record cannot be serialized.
pub async fn save_to_jsonl(store: &InMemoryVenueStore, path: &Path) -> StoreResult<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let file = File::create(&temp_path).await?;
    let mut writer = BufWriter::new(file);

    for venue in store.export_all().await {
        let json = serde_json::to_string(&venue)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    tokio::fs::rename(&temp_path, path).await?;

    Ok(())
}
