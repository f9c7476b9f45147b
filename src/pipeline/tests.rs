//! Tests for pipeline plumbing

use super::*;
use crate::schema::{artists_schema, songs_schema};
use bytes::Bytes;
use serde_json::json;

fn song_record(id: &str, year: i64, artist: &str) -> JsonValue {
    json!({
        "song_id": id,
        "title": "T",
        "artist_id": artist,
        "year": year,
        "duration": 100.0,
    })
}

#[tokio::test]
async fn test_read_records_mixed_file_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let location = StorageLocation::parse(dir.path().to_str().unwrap()).unwrap();

    location
        .put("song_data/a/one.json", Bytes::from_static(br#"{"song_id": "S1"}"#))
        .await
        .unwrap();
    location
        .put(
            "song_data/b/two.json",
            Bytes::from_static(br#"[{"song_id": "S2"}, {"song_id": "S3"}]"#),
        )
        .await
        .unwrap();

    let (records, files) = read_records(&location, "song_data").await.unwrap();
    assert_eq!(files, 2);
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_read_records_bad_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let location = StorageLocation::parse(dir.path().to_str().unwrap()).unwrap();

    location
        .put("log_data/bad.json", Bytes::from_static(b"not json at all"))
        .await
        .unwrap();

    assert!(read_records(&location, "log_data").await.is_err());
}

#[tokio::test]
async fn test_write_dataset_partitioned_layout() {
    let dir = tempfile::tempdir().unwrap();
    let output = StorageLocation::parse(dir.path().to_str().unwrap()).unwrap();

    let records = vec![
        song_record("S1", 1999, "AR1"),
        song_record("S2", 1999, "AR1"),
        song_record("S3", 0, "AR2"),
    ];

    let rows = write_dataset(
        &output,
        Dataset::Songs,
        records,
        &songs_schema(),
        &["year", "artist_id"],
    )
    .await
    .unwrap();
    assert_eq!(rows, 3);

    assert!(dir
        .path()
        .join("songs/year=1999/artist_id=AR1/data.parquet")
        .exists());
    assert!(dir
        .path()
        .join("songs/year=0/artist_id=AR2/data.parquet")
        .exists());
}

#[tokio::test]
async fn test_write_dataset_overwrites_stale_partitions() {
    let dir = tempfile::tempdir().unwrap();
    let output = StorageLocation::parse(dir.path().to_str().unwrap()).unwrap();

    write_dataset(
        &output,
        Dataset::Songs,
        vec![song_record("S1", 1999, "AR1")],
        &songs_schema(),
        &["year", "artist_id"],
    )
    .await
    .unwrap();

    write_dataset(
        &output,
        Dataset::Songs,
        vec![song_record("S2", 2004, "AR2")],
        &songs_schema(),
        &["year", "artist_id"],
    )
    .await
    .unwrap();

    // The old partition's file is gone, only the new one remains
    assert!(!dir
        .path()
        .join("songs/year=1999/artist_id=AR1/data.parquet")
        .exists());
    assert!(dir
        .path()
        .join("songs/year=2004/artist_id=AR2/data.parquet")
        .exists());
}

#[tokio::test]
async fn test_write_dataset_unpartitioned_writes_even_when_empty() {
    let dir = tempfile::tempdir().unwrap();
    let output = StorageLocation::parse(dir.path().to_str().unwrap()).unwrap();

    let rows = write_dataset(&output, Dataset::Artists, vec![], &artists_schema(), &[])
        .await
        .unwrap();
    assert_eq!(rows, 0);
    assert!(dir.path().join("artists/data.parquet").exists());
}
