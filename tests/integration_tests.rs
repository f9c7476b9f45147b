//! End-to-end tests for the full ETL job
//!
//! Builds a small input tree on a local filesystem location, runs both
//! pipelines, and reads the Parquet output back.

use playlake::config::JobConfig;
use playlake::pipeline;
use playlake::transform::EventTimeZone;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::json;
use std::fs::File;
use std::path::Path;

// ============================================================================
// Fixture
// ============================================================================

/// Three track records; the first two are matched exactly by log events,
/// the third only nearly (duration differs).
fn write_song_data(input: &Path) {
    let songs = [
        (
            "song_data/A/B/C/TRAAA01.json",
            json!({
                "num_songs": 1,
                "song_id": "SOAAA01",
                "artist_id": "AR001",
                "artist_latitude": 35.14968,
                "artist_longitude": -90.04892,
                "artist_location": "Memphis, TN",
                "artist_name": "Elena Moss",
                "title": "Paper Lanterns",
                "duration": 231.56934,
                "year": 1999
            }),
        ),
        (
            "song_data/A/B/D/TRABB02.json",
            json!({
                "num_songs": 1,
                "song_id": "SOBBB02",
                "artist_id": "AR002",
                "artist_latitude": null,
                "artist_longitude": null,
                "artist_location": "",
                "artist_name": "The Quiet Division",
                "title": "Cold Harbor",
                "duration": 180.11056,
                "year": 0
            }),
        ),
        (
            "song_data/A/C/E/TRACC03.json",
            json!({
                "num_songs": 1,
                "song_id": "SOCCC03",
                "artist_id": "AR003",
                "artist_latitude": 51.50632,
                "artist_longitude": -0.12714,
                "artist_location": "London, England",
                "artist_name": "Marlowe Finch",
                "title": "Glass River",
                "duration": 412.02567,
                "year": 2004
            }),
        ),
    ];

    for (rel, record) in songs {
        let path = input.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, record.to_string()).unwrap();
    }
}

/// Five log events: three NextSong (two exact matches, one near miss) and
/// two other page types. Two NextSong events share a timestamp.
fn write_log_data(input: &Path) {
    let events = [
        json!({
            "page": "NextSong",
            "userId": "26", "firstName": "Ryan", "lastName": "Smith",
            "gender": "M", "level": "paid",
            "ts": 1_542_298_745_796_i64,
            "artist": "Elena Moss", "song": "Paper Lanterns", "length": 231.56934,
            "sessionId": 583,
            "location": "San Jose-Sunnyvale-Santa Clara, CA",
            "userAgent": "Mozilla/5.0"
        }),
        json!({
            "page": "NextSong",
            "userId": "80", "firstName": "Tegan", "lastName": "Levine",
            "gender": "F", "level": "free",
            "ts": 1_542_298_745_796_i64,
            "artist": "The Quiet Division", "song": "Cold Harbor", "length": 180.11056,
            "sessionId": 611,
            "location": "Portland-South Portland, ME",
            "userAgent": "Mozilla/5.0"
        }),
        // Near miss: duration rounded differently, so no fact row
        json!({
            "page": "NextSong",
            "userId": "26", "firstName": "Ryan", "lastName": "Smith",
            "gender": "M", "level": "paid",
            "ts": 1_542_306_061_796_i64,
            "artist": "Marlowe Finch", "song": "Glass River", "length": 412.03,
            "sessionId": 583,
            "location": "San Jose-Sunnyvale-Santa Clara, CA",
            "userAgent": "Mozilla/5.0"
        }),
        json!({
            "page": "Home",
            "userId": "26", "ts": 1_542_298_700_000_i64, "sessionId": 583
        }),
        json!({
            "page": "Login",
            "userId": "", "ts": 1_542_298_600_000_i64, "sessionId": 612
        }),
    ];

    let body: String = events.iter().map(|e| format!("{e}\n")).collect();
    let path = input.join("log_data/2018/11/2018-11-15-events.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

fn fixture_config(input: &Path, output: &Path) -> JobConfig {
    write_song_data(input);
    write_log_data(input);
    JobConfig::new(
        input.to_str().unwrap().to_string(),
        output.to_str().unwrap().to_string(),
    )
    .with_timezone(EventTimeZone::Utc)
}

// ============================================================================
// Helpers
// ============================================================================

/// Total row count across every Parquet file under a dataset directory
fn dataset_rows(output: &Path, dataset: &str) -> usize {
    parquet_files(&output.join(dataset))
        .iter()
        .map(|path| {
            let file = File::open(path).unwrap();
            let reader = ParquetRecordBatchReaderBuilder::try_new(file)
                .unwrap()
                .build()
                .unwrap();
            reader
                .map(|batch| batch.unwrap().num_rows())
                .sum::<usize>()
        })
        .sum()
}

fn parquet_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    if dir.is_dir() {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                files.extend(parquet_files(&path));
            } else if path.extension().is_some_and(|e| e == "parquet") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

/// Relative path and contents of every file under the output root
fn snapshot(output: &Path) -> Vec<(String, Vec<u8>)> {
    let mut all = Vec::new();
    fn walk(root: &Path, dir: &Path, all: &mut Vec<(String, Vec<u8>)>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, all);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_str().unwrap().to_string();
                all.push((rel, std::fs::read(&path).unwrap()));
            }
        }
    }
    walk(output, output, &mut all);
    all.sort_by(|a, b| a.0.cmp(&b.0));
    all
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_full_job_round_trip() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let config = fixture_config(input.path(), output.path());

    let stats = pipeline::run_job(&config).await.unwrap();

    // Catalog: one row per track record
    assert_eq!(stats.catalog.files_read, 3);
    assert_eq!(stats.catalog.songs_rows, 3);
    assert_eq!(stats.catalog.artists_rows, 3);
    assert_eq!(dataset_rows(output.path(), "songs"), 3);
    assert_eq!(dataset_rows(output.path(), "artists"), 3);

    // Activity: three NextSong events, no user dedup
    assert_eq!(stats.activity.next_song_events, 3);
    assert_eq!(dataset_rows(output.path(), "users"), 3);

    // Two of the three events share a timestamp
    assert_eq!(dataset_rows(output.path(), "time"), 2);

    // Exactly two events match a track on (artist, song, length)
    assert_eq!(stats.activity.songplays_rows, 2);
    assert_eq!(dataset_rows(output.path(), "songplays"), 2);
}

#[tokio::test]
async fn test_partition_layout() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let config = fixture_config(input.path(), output.path());

    pipeline::run_job(&config).await.unwrap();

    // songs partitioned by (year, artist_id)
    assert!(output
        .path()
        .join("songs/year=1999/artist_id=AR001/data.parquet")
        .exists());
    assert!(output
        .path()
        .join("songs/year=0/artist_id=AR002/data.parquet")
        .exists());

    // songplays partitioned by (year, month); fixture timestamps are
    // November 2018 UTC
    assert!(output
        .path()
        .join("songplays/year=2018/month=11/data.parquet")
        .exists());

    // artists, users, and time land unpartitioned at the dataset root
    assert!(output.path().join("artists/data.parquet").exists());
    assert!(output.path().join("users/data.parquet").exists());
    assert!(output.path().join("time/data.parquet").exists());
}

#[tokio::test]
async fn test_job_is_idempotent() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let config = fixture_config(input.path(), output.path());

    pipeline::run_job(&config).await.unwrap();
    let first = snapshot(output.path());

    pipeline::run_job(&config).await.unwrap();
    let second = snapshot(output.path());

    assert_eq!(first.len(), second.len());
    for ((path_a, bytes_a), (path_b, bytes_b)) in first.iter().zip(second.iter()) {
        assert_eq!(path_a, path_b);
        assert_eq!(bytes_a, bytes_b, "contents differ for {path_a}");
    }
}

#[tokio::test]
async fn test_missing_input_is_fatal() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    // No song_data or log_data written at all
    let config = JobConfig::new(
        input.path().to_str().unwrap().to_string(),
        output.path().to_str().unwrap().to_string(),
    );

    assert!(pipeline::run_job(&config).await.is_err());
}
