//! Integration tests for the venue-graph CLI.
//!
//! These tests run the compiled binary against a temporary directory.

use rstest::{fixture, rstest};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

mod common;
use common::run_venue_graph_in_dir;

const SAMPLE_VENUES: &str = concat!(
    "{\"id\":\"burn\",\"name\":\"Burn\",\"template\":\"partymap\"}\n",
    "{\"id\":\"camp-a\",\"parentId\":\"burn\",\"name\":\"Camp A\"}\n",
    "{\"id\":\"camp-b\",\"parentId\":\"burn\"}\n",
    "{\"id\":\"stage\",\"parentId\":\"camp-a\"}\n",
    "{\"id\":\"booth\",\"parentId\":\"stage\"}\n",
    "{\"id\":\"loop-a\",\"parentId\":\"loop-b\"}\n",
    "{\"id\":\"loop-b\",\"parentId\":\"loop-a\"}\n",
);

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides an initialized directory with the sample hierarchy imported
#[fixture]
fn populated_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let output = run_venue_graph_in_dir(temp.path(), &["init", "--quiet"]);
    assert!(
        output.status.success(),
        "Failed to initialize: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    std::fs::write(temp.path().join("sample.jsonl"), SAMPLE_VENUES).unwrap();
    let output = run_venue_graph_in_dir(temp.path(), &["import", "sample.jsonl"]);
    assert!(
        output.status.success(),
        "Failed to import: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    temp
}

fn json_ids(dir: &Path, args: &[&str]) -> Vec<String> {
    let output = run_venue_graph_in_dir(dir, args);
    assert!(
        output.status.success(),
        "Command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    parsed
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Init
// ============================================================================

#[rstest]
fn test_init_creates_layout(temp_dir: TempDir) {
    let output = run_venue_graph_in_dir(temp_dir.path(), &["init", "--max-batch-size", "3"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Initialized venue-graph"));
    assert!(stdout.contains("Max batch size: 3"));

    let config =
        std::fs::read_to_string(temp_dir.path().join(".venue-graph/config.yaml")).unwrap();
    assert!(config.contains("max-batch-size: 3"));
    assert!(temp_dir.path().join(".venue-graph/venues.jsonl").exists());
}

#[rstest]
fn test_init_twice_fails(temp_dir: TempDir) {
    run_venue_graph_in_dir(temp_dir.path(), &["init", "--quiet"]);
    let output = run_venue_graph_in_dir(temp_dir.path(), &["init"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already initialized"));
}

#[rstest]
fn test_command_outside_repository_fails(temp_dir: TempDir) {
    let output = run_venue_graph_in_dir(temp_dir.path(), &["show", "burn"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("venue-graph init"));
}

// ============================================================================
// Lookups
// ============================================================================

#[rstest]
fn test_sovereign_text_output(populated_dir: TempDir) {
    let output = run_venue_graph_in_dir(populated_dir.path(), &["sovereign", "booth"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("* burn  Burn  [partymap]"));
    assert!(stdout.contains("Path: booth -> stage -> camp-a -> burn"));
}

#[rstest]
fn test_sovereign_json_output(populated_dir: TempDir) {
    let output = run_venue_graph_in_dir(populated_dir.path(), &["--json", "sovereign", "stage"]);

    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["venue"]["id"], "burn");
    assert_eq!(
        parsed["checked_venue_ids"],
        serde_json::json!(["stage", "camp-a"])
    );
}

#[rstest]
fn test_related_two_levels(populated_dir: TempDir) {
    let ids = json_ids(populated_dir.path(), &["related", "booth", "--json"]);
    assert_eq!(ids, vec!["burn", "camp-a", "camp-b", "stage"]);
}

#[rstest]
fn test_related_all_levels(populated_dir: TempDir) {
    let ids = json_ids(populated_dir.path(), &["related", "camp-b", "--all", "--json"]);
    assert_eq!(ids, vec!["burn", "camp-a", "camp-b", "stage", "booth"]);
}

#[rstest]
fn test_related_tree(populated_dir: TempDir) {
    let output = run_venue_graph_in_dir(
        populated_dir.path(),
        &["related", "burn", "--all", "--tree"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = "\
* burn Burn [partymap]
|-- camp-a Camp A
|   `-- stage
|       `-- booth
`-- camp-b
";
    assert_eq!(stdout, expected);
}

#[rstest]
fn test_children_of_several_parents(populated_dir: TempDir) {
    let ids = json_ids(
        populated_dir.path(),
        &["--json", "children", "camp-a", "burn", "ghost"],
    );
    assert_eq!(ids, vec!["stage", "camp-a", "camp-b"]);
}

#[rstest]
#[case::two_levels(&["descendants", "burn"], &["camp-a", "camp-b", "stage"])]
#[case::closure(&["descendants", "burn", "--all"], &["camp-a", "camp-b", "stage", "booth"])]
#[case::one_level(&["descendants", "burn", "--all", "--levels", "1"], &["camp-a", "camp-b"])]
fn test_descendants(
    populated_dir: TempDir,
    #[case] args: &[&str],
    #[case] expected: &[&str],
) {
    let mut argv = vec!["--json"];
    argv.extend_from_slice(args);
    assert_eq!(json_ids(populated_dir.path(), &argv), expected);
}

#[rstest]
fn test_show_lists_attributes(populated_dir: TempDir) {
    let output = run_venue_graph_in_dir(populated_dir.path(), &["show", "camp-a"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("o camp-a  Camp A"));
    assert!(stdout.contains("Parent: burn"));
}

// ============================================================================
// Failures
// ============================================================================

#[rstest]
#[case::missing(&["sovereign", "nowhere"], "nowhere does not exist")]
#[case::cycle(&["related", "loop-a"], "Circular reference detected")]
#[case::depth(&["sovereign", "booth", "--max-depth", "1"], "Maximum depth of 1")]
#[case::show_missing(&["show", "nowhere"], "nowhere does not exist")]
fn test_lookup_failures_are_reported(
    populated_dir: TempDir,
    #[case] args: &[&str],
    #[case] cause: &str,
) {
    let output = run_venue_graph_in_dir(populated_dir.path(), args);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("this venue hierarchy could not be loaded"),
        "stderr was: {stderr}"
    );
    assert!(stderr.contains(cause), "stderr was: {stderr}");
}

#[rstest]
fn test_import_reports_warnings(populated_dir: TempDir) {
    std::fs::write(
        populated_dir.path().join("more.jsonl"),
        "{\"id\":\"extra\",\"parentId\":\"burn\"}\nnot json\n",
    )
    .unwrap();

    let output = run_venue_graph_in_dir(populated_dir.path(), &["--json", "import", "more.jsonl"]);
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["imported"], 1);
    assert_eq!(parsed["warnings"].as_array().unwrap().len(), 1);

    let ids = json_ids(populated_dir.path(), &["--json", "children", "burn"]);
    assert_eq!(ids, vec!["camp-a", "camp-b", "extra"]);
}

#[rstest]
fn test_import_with_memory_backend_fails(temp_dir: TempDir) {
    let output = run_venue_graph_in_dir(temp_dir.path(), &["init", "--quiet"]);
    assert!(output.status.success());
    std::fs::write(
        temp_dir.path().join(".venue-graph/config.yaml"),
        "storage:\n  backend: memory\n  data-file: .venue-graph/venues.jsonl\n",
    )
    .unwrap();
    std::fs::write(temp_dir.path().join("sample.jsonl"), SAMPLE_VENUES).unwrap();

    let output = run_venue_graph_in_dir(temp_dir.path(), &["import", "sample.jsonl"]);

    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Imported"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot persist imports"), "stderr was: {stderr}");
    let data = std::fs::read_to_string(temp_dir.path().join(".venue-graph/venues.jsonl")).unwrap();
    assert!(data.is_empty());
}
