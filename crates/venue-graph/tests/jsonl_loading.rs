//! Integration tests for resilient JSONL loading and saving.
//!
//! # Test Coverage
//!
//! - Warnings for malformed, invalid, and duplicate records
//! - Store functionality after a lossy load
//! - Save/load persistence, including payload attributes
//! - Fatal errors for unreadable files

mod common;

use common::{ids, venue};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use venue_graph::domain::VenueId;
use venue_graph::error::StoreError;
use venue_graph::resolver::VenueGraphResolver;
use venue_graph::store::in_memory::{LoadWarning, load_from_jsonl, save_to_jsonl};
use venue_graph::store::{InMemoryVenueStore, StoreConfig};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_temp_jsonl_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

// =============================================================================
// Resilient Loading
// =============================================================================

#[tokio::test]
async fn test_load_skips_bad_lines_with_warnings() {
    let file = create_temp_jsonl_file(
        concat!(
            "{\"id\":\"burn\",\"name\":\"Burn\"}\n",
            "not json at all\n",
            "\n",
            "{\"id\":\"   \"}\n",
            "{\"id\":\"camp\",\"parentId\":\"burn\"}\n",
            "{\"parentId\":\"burn\"}\n",
        )
        .as_bytes(),
    );

    let (store, warnings) = load_from_jsonl(file.path(), StoreConfig::default())
        .await
        .unwrap();

    assert_eq!(store.len().await, 2);
    assert_eq!(warnings.len(), 3);
    assert!(matches!(
        warnings[0],
        LoadWarning::MalformedJson { line_number: 2, .. }
    ));
    assert!(matches!(
        warnings[1],
        LoadWarning::InvalidVenue { line_number: 4, .. }
    ));
    assert!(matches!(
        warnings[2],
        LoadWarning::MalformedJson { line_number: 6, .. }
    ));
}

#[tokio::test]
async fn test_duplicate_ids_keep_last_record() {
    let file = create_temp_jsonl_file(
        concat!(
            "{\"id\":\"camp\",\"name\":\"Old\"}\n",
            "{\"id\":\"camp\",\"name\":\"New\",\"parentId\":\"burn\"}\n",
            "{\"id\":\"burn\"}\n",
        )
        .as_bytes(),
    );

    let (store, warnings) = load_from_jsonl(file.path(), StoreConfig::default())
        .await
        .unwrap();

    assert_eq!(
        warnings,
        vec![LoadWarning::DuplicateVenue {
            venue_id: VenueId::new("camp"),
            line_number: 2,
        }]
    );
    assert!(warnings[0].to_string().contains("duplicate venue 'camp'"));

    let resolver = VenueGraphResolver::new(&store);
    let camp = resolver
        .fetch_venue(&VenueId::new("camp"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(camp.name(), Some("New"));
    assert_eq!(camp.parent(), Some(&VenueId::new("burn")));
}

#[tokio::test]
async fn test_store_is_usable_after_lossy_load() {
    let file = create_temp_jsonl_file(
        concat!(
            "{\"id\":\"root\"}\n",
            "{broken\n",
            "{\"id\":\"a\",\"parentId\":\"root\"}\n",
            "{\"id\":\"b\",\"parentId\":\"a\"}\n",
        )
        .as_bytes(),
    );

    let (store, warnings) = load_from_jsonl(file.path(), StoreConfig::default())
        .await
        .unwrap();
    assert_eq!(warnings.len(), 1);

    let related = VenueGraphResolver::new(&store)
        .fetch_related(&VenueId::new("b"))
        .await
        .unwrap();
    assert_eq!(ids(&related), vec!["root", "a", "b"]);
}

#[tokio::test]
async fn test_non_utf8_file_is_rejected() {
    let file = create_temp_jsonl_file(b"{\"id\":\"root\"}\n\xff\xfe\n");

    let err = load_from_jsonl(file.path(), StoreConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidFormat(_)));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();

    let err = load_from_jsonl(&temp_dir.path().join("absent.jsonl"), StoreConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_save_then_load_preserves_records() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("venues.jsonl");

    let store = InMemoryVenueStore::new(StoreConfig::new(3).unwrap());
    store
        .import_venues([
            venue("burn", None)
                .with_attr("name", "Burn")
                .with_attr("template", "partymap"),
            venue("camp", Some("burn")).with_attr("zoom", 4),
        ])
        .await;
    save_to_jsonl(&store, &path).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("{\"id\":\"burn\""));
    assert!(lines[1].contains("\"parentId\":\"burn\""));
    assert!(!temp_dir.path().join("venues.jsonl.tmp").exists());

    let (reloaded, warnings) = load_from_jsonl(&path, StoreConfig::new(3).unwrap())
        .await
        .unwrap();
    assert!(warnings.is_empty());
    assert_eq!(reloaded.export_all().await, store.export_all().await);
}

#[tokio::test]
async fn test_save_leaves_sibling_tmp_file_alone() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("venues.jsonl");
    let sibling = temp_dir.path().join("venues.tmp");
    std::fs::write(&sibling, "unrelated notes\n").unwrap();

    let store = InMemoryVenueStore::new(StoreConfig::default());
    store.import_venues([venue("burn", None)]).await;
    save_to_jsonl(&store, &path).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(&sibling).unwrap(),
        "unrelated notes\n"
    );
    assert!(std::fs::read_to_string(&path).unwrap().contains("\"burn\""));
}

#[tokio::test]
async fn test_save_to_tmp_named_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("venues.tmp");

    let store = InMemoryVenueStore::new(StoreConfig::default());
    store
        .import_venues([venue("burn", None), venue("camp", Some("burn"))])
        .await;
    save_to_jsonl(&store, &path).await.unwrap();

    assert!(!temp_dir.path().join("venues.tmp.tmp").exists());
    let (reloaded, warnings) = load_from_jsonl(&path, StoreConfig::default())
        .await
        .unwrap();
    assert!(warnings.is_empty());
    assert_eq!(reloaded.len().await, 2);
}
