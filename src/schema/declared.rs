//! Declared schemas
//!
//! The two read schemas mirror the shape of the raw JSON inputs; the five
//! table schemas describe what lands in Parquet. Partition columns appear
//! in the table schemas and are stripped from file contents at write time.

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};

/// Millisecond-precision timestamp type used for derived instants
fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Millisecond, None)
}

// ============================================================================
// Read Schemas
// ============================================================================

/// Declared schema for track-metadata files
pub fn song_read_schema() -> Schema {
    Schema::new(vec![
        Field::new("num_songs", DataType::Int64, true),
        Field::new("song_id", DataType::Utf8, true),
        Field::new("artist_id", DataType::Utf8, true),
        Field::new("artist_latitude", DataType::Float64, true),
        Field::new("artist_longitude", DataType::Float64, true),
        Field::new("artist_location", DataType::Utf8, true),
        Field::new("artist_name", DataType::Utf8, true),
        Field::new("title", DataType::Utf8, true),
        Field::new("duration", DataType::Float64, true),
        Field::new("year", DataType::Int64, true),
    ])
}

/// Declared schema for activity-log files
///
/// Field names match the raw camelCase keys; projections rename them.
pub fn log_read_schema() -> Schema {
    Schema::new(vec![
        Field::new("page", DataType::Utf8, true),
        Field::new("userId", DataType::Utf8, true),
        Field::new("firstName", DataType::Utf8, true),
        Field::new("lastName", DataType::Utf8, true),
        Field::new("gender", DataType::Utf8, true),
        Field::new("level", DataType::Utf8, true),
        Field::new("ts", DataType::Int64, true),
        Field::new("artist", DataType::Utf8, true),
        Field::new("song", DataType::Utf8, true),
        Field::new("length", DataType::Float64, true),
        Field::new("sessionId", DataType::Int64, true),
        Field::new("location", DataType::Utf8, true),
        Field::new("userAgent", DataType::Utf8, true),
    ])
}

// ============================================================================
// Table Schemas
// ============================================================================

/// `songs` table, partitioned by (year, artist_id)
pub fn songs_schema() -> Schema {
    Schema::new(vec![
        Field::new("song_id", DataType::Utf8, true),
        Field::new("title", DataType::Utf8, true),
        Field::new("artist_id", DataType::Utf8, true),
        Field::new("year", DataType::Int64, true),
        Field::new("duration", DataType::Float64, true),
    ])
}

/// `artists` table, unpartitioned
pub fn artists_schema() -> Schema {
    Schema::new(vec![
        Field::new("artist_id", DataType::Utf8, true),
        Field::new("name", DataType::Utf8, true),
        Field::new("location", DataType::Utf8, true),
        Field::new("latitude", DataType::Float64, true),
        Field::new("longitude", DataType::Float64, true),
    ])
}

/// `users` table, unpartitioned
pub fn users_schema() -> Schema {
    Schema::new(vec![
        Field::new("user_id", DataType::Utf8, true),
        Field::new("first_name", DataType::Utf8, true),
        Field::new("last_name", DataType::Utf8, true),
        Field::new("gender", DataType::Utf8, true),
        Field::new("level", DataType::Utf8, true),
    ])
}

/// `time` table, unpartitioned
pub fn time_schema() -> Schema {
    Schema::new(vec![
        Field::new("timestamp", timestamp_type(), true),
        Field::new("hour", DataType::Int32, true),
        Field::new("day", DataType::Int32, true),
        Field::new("week", DataType::Int32, true),
        Field::new("month", DataType::Int32, true),
        Field::new("year", DataType::Int32, true),
        Field::new("weekday", DataType::Int32, true),
    ])
}

/// `songplays` fact table, partitioned by (year, month)
pub fn songplays_schema() -> Schema {
    Schema::new(vec![
        Field::new("start_time", timestamp_type(), true),
        Field::new("user_id", DataType::Utf8, true),
        Field::new("level", DataType::Utf8, true),
        Field::new("song_id", DataType::Utf8, true),
        Field::new("artist_id", DataType::Utf8, true),
        Field::new("session_id", DataType::Int64, true),
        Field::new("location", DataType::Utf8, true),
        Field::new("user_agent", DataType::Utf8, true),
        Field::new("month", DataType::Int32, true),
        Field::new("year", DataType::Int32, true),
    ])
}
