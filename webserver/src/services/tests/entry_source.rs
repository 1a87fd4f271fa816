//! Tests for the EntrySource service

use super::fixtures::*;
use crate::error::WebServerError;
use crate::services::FileEntrySource;
use crate::traits::EntrySource;
use shared::entries;
use tempfile::TempDir;

#[tokio::test]
async fn test_loads_entries_in_file_order() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "entries.json", r#"["Trainspotting", "28 Days Later", "Sunshine"]"#);
    let source = FileEntrySource::new(dir.path().join("entries.json"));

    let loaded = source.load_entries().await.unwrap();

    assert_eq!(loaded, entries(["Trainspotting", "28 Days Later", "Sunshine"]));
}

#[tokio::test]
async fn test_rereads_file_on_every_load() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "entries.json", r#"["A", "B"]"#);
    let source = FileEntrySource::new(dir.path().join("entries.json"));
    assert_eq!(source.load_entries().await.unwrap(), entries(["A", "B"]));

    write_file(dir.path(), "entries.json", r#"["X", "Y", "Z"]"#);

    assert_eq!(source.load_entries().await.unwrap(), entries(["X", "Y", "Z"]));
}

#[tokio::test]
async fn test_empty_array_is_valid() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "entries.json", "[]");
    let source = FileEntrySource::new(dir.path().join("entries.json"));

    assert!(source.load_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let source = FileEntrySource::new(dir.path().join("absent.json"));

    let result = source.load_entries().await;

    assert!(matches!(result, Err(WebServerError::EntriesUnavailable { .. })));
}

#[tokio::test]
async fn test_malformed_file_is_json_error() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "entries.json", r#"{"entries": ["A"]}"#);
    let source = FileEntrySource::new(dir.path().join("entries.json"));

    let result = source.load_entries().await;

    assert!(matches!(result, Err(WebServerError::Json(_))));
}

#[test]
fn test_describe_names_the_path() {
    let source = FileEntrySource::new("data/entries.json");

    assert_eq!(source.describe(), "file data/entries.json");
    assert_eq!(source.path(), std::path::Path::new("data/entries.json"));
}
