//! Catalog pipeline: track metadata to `songs` and `artists`

use super::{read_records, write_dataset};
use crate::config::SONG_DATA_PREFIX;
use crate::error::Result;
use crate::schema::{artists_schema, coerce_records, song_read_schema, songs_schema};
use crate::storage::StorageLocation;
use crate::transform::project;
use crate::types::{CatalogStats, Dataset};
use tracing::info;

/// Columns of the `songs` projection
const SONGS_COLUMNS: &[(&str, &str)] = &[
    ("song_id", "song_id"),
    ("title", "title"),
    ("artist_id", "artist_id"),
    ("year", "year"),
    ("duration", "duration"),
];

/// Columns of the `artists` projection, renaming the `artist_*` source fields
const ARTISTS_COLUMNS: &[(&str, &str)] = &[
    ("artist_id", "artist_id"),
    ("artist_name", "name"),
    ("artist_location", "location"),
    ("artist_latitude", "latitude"),
    ("artist_longitude", "longitude"),
];

/// The catalog pipeline
///
/// Reads every track-metadata file under `song_data/` with the declared
/// schema and derives two denormalized tables: `songs`, partitioned by
/// (year, artist_id), and `artists`, unpartitioned. No filtering beyond
/// the schema itself; malformed fields are nulls by the time they land
/// here.
pub struct CatalogPipeline<'a> {
    input: &'a StorageLocation,
    output: &'a StorageLocation,
}

impl<'a> CatalogPipeline<'a> {
    /// Create a new catalog pipeline
    pub fn new(input: &'a StorageLocation, output: &'a StorageLocation) -> Self {
        Self { input, output }
    }

    /// Run the pipeline
    pub async fn run(&self) -> Result<CatalogStats> {
        info!("catalog: reading track metadata");
        let (raw, files_read) = read_records(self.input, SONG_DATA_PREFIX).await?;
        let tracks = coerce_records(&raw, &song_read_schema());
        info!(files = files_read, records = tracks.len(), "catalog: parsed track metadata");

        let songs = project(&tracks, SONGS_COLUMNS);
        let songs_rows = write_dataset(
            self.output,
            Dataset::Songs,
            songs,
            &songs_schema(),
            &["year", "artist_id"],
        )
        .await?;

        let artists = project(&tracks, ARTISTS_COLUMNS);
        let artists_rows =
            write_dataset(self.output, Dataset::Artists, artists, &artists_schema(), &[]).await?;

        Ok(CatalogStats {
            files_read,
            songs_rows,
            artists_rows,
        })
    }
}
