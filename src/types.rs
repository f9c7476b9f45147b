//! Common types used throughout playlake
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Datasets
// ============================================================================

/// The five output datasets produced by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// Track dimension, partitioned by (year, artist_id)
    Songs,
    /// Artist dimension, unpartitioned
    Artists,
    /// User dimension, unpartitioned
    Users,
    /// Time dimension, unpartitioned
    Time,
    /// Song-play fact table, partitioned by (year, month)
    Songplays,
}

impl Dataset {
    /// Directory name of this dataset under the output location
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Songs => "songs",
            Dataset::Artists => "artists",
            Dataset::Users => "users",
            Dataset::Time => "time",
            Dataset::Songplays => "songplays",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Run Statistics
// ============================================================================

/// Rows written per dataset by the catalog pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Source files read
    pub files_read: usize,
    /// Rows written to `songs`
    pub songs_rows: usize,
    /// Rows written to `artists`
    pub artists_rows: usize,
}

/// Rows written per dataset by the activity pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    /// Source log files read
    pub files_read: usize,
    /// Log events after the page filter
    pub next_song_events: usize,
    /// Rows written to `users`
    pub users_rows: usize,
    /// Rows written to `time`
    pub time_rows: usize,
    /// Rows written to `songplays`
    pub songplays_rows: usize,
}

/// Combined statistics for a full job run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobStats {
    /// Catalog pipeline statistics
    pub catalog: CatalogStats,
    /// Activity pipeline statistics
    pub activity: ActivityStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_names() {
        assert_eq!(Dataset::Songs.name(), "songs");
        assert_eq!(Dataset::Artists.name(), "artists");
        assert_eq!(Dataset::Users.name(), "users");
        assert_eq!(Dataset::Time.name(), "time");
        assert_eq!(Dataset::Songplays.name(), "songplays");
        assert_eq!(Dataset::Songplays.to_string(), "songplays");
    }
}
