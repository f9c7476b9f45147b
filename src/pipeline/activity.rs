//! Activity pipeline: activity logs to `users`, `time`, and `songplays`

use super::{read_records, write_dataset};
use crate::config::{LOG_DATA_PREFIX, SONG_DATA_PREFIX};
use crate::error::Result;
use crate::schema::{
    coerce_records, infer_schema, log_read_schema, songplays_schema, time_schema, users_schema,
};
use crate::storage::StorageLocation;
use crate::transform::{filter_page, inner_join_on_track, project, time_rows, EventTimeZone};
use crate::types::{ActivityStats, Dataset, JsonValue};
use serde_json::{json, Value};
use tracing::info;

/// The page value marking a song-play event
const NEXT_SONG: &str = "NextSong";

/// Columns of the `users` projection
///
/// Repeated appearances of a user across events all become rows; the table
/// is a straight projection, not a dimension keyed on user_id.
const USERS_COLUMNS: &[(&str, &str)] = &[
    ("userId", "user_id"),
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("gender", "gender"),
    ("level", "level"),
];

/// The activity pipeline
///
/// An ordered sequence over the activity logs: parse, filter to NextSong,
/// project users, derive the time dimension, re-read the track metadata
/// with inferred types, join on exact (artist, song, length) equality, and
/// project the songplays fact table.
pub struct ActivityPipeline<'a> {
    input: &'a StorageLocation,
    output: &'a StorageLocation,
    timezone: EventTimeZone,
}

impl<'a> ActivityPipeline<'a> {
    /// Create a new activity pipeline
    pub fn new(
        input: &'a StorageLocation,
        output: &'a StorageLocation,
        timezone: EventTimeZone,
    ) -> Self {
        Self {
            input,
            output,
            timezone,
        }
    }

    /// Run the pipeline
    pub async fn run(&self) -> Result<ActivityStats> {
        info!("activity: reading activity logs");
        let (raw, files_read) = read_records(self.input, LOG_DATA_PREFIX).await?;
        let events = coerce_records(&raw, &log_read_schema());

        let events = filter_page(events, NEXT_SONG);
        let next_song_events = events.len();
        info!(files = files_read, events = next_song_events, "activity: filtered to song plays");

        let users = project(&events, USERS_COLUMNS);
        let users_rows =
            write_dataset(self.output, Dataset::Users, users, &users_schema(), &[]).await?;

        let time = time_rows(&events, self.timezone);
        let time_rows_written =
            write_dataset(self.output, Dataset::Time, time, &time_schema(), &[]).await?;

        // Second read of the track metadata, this time with inferred types
        let (track_raw, _) = read_records(self.input, SONG_DATA_PREFIX).await?;
        let inferred = infer_schema(&track_raw)?;
        let tracks = coerce_records(&track_raw, &inferred);

        let pairs = inner_join_on_track(&events, &tracks);
        info!(matched = pairs.len(), "activity: joined plays to tracks");

        let plays = self.fact_rows(&pairs);
        let songplays_rows = write_dataset(
            self.output,
            Dataset::Songplays,
            plays,
            &songplays_schema(),
            &["year", "month"],
        )
        .await?;

        Ok(ActivityStats {
            files_read,
            next_song_events,
            users_rows,
            time_rows: time_rows_written,
            songplays_rows,
        })
    }

    /// Project joined (event, track) pairs into fact rows
    fn fact_rows(&self, pairs: &[(&Value, &Value)]) -> Vec<JsonValue> {
        pairs
            .iter()
            .map(|(event, track)| {
                let ts = event.get("ts").and_then(Value::as_i64);
                // month and year are derived again here, straight from ts,
                // rather than reused from the time-dimension rows
                let parts = ts.and_then(|millis| self.timezone.parts(millis));

                json!({
                    "start_time": ts,
                    "user_id": event.get("userId").cloned().unwrap_or(Value::Null),
                    "level": event.get("level").cloned().unwrap_or(Value::Null),
                    "song_id": track.get("song_id").cloned().unwrap_or(Value::Null),
                    "artist_id": track.get("artist_id").cloned().unwrap_or(Value::Null),
                    "session_id": event.get("sessionId").cloned().unwrap_or(Value::Null),
                    "location": event.get("location").cloned().unwrap_or(Value::Null),
                    "user_agent": event.get("userAgent").cloned().unwrap_or(Value::Null),
                    "month": parts.map(|p| p.month),
                    "year": parts.map(|p| p.year),
                })
            })
            .collect()
    }
}
