//! Exact-equality join between play events and tracks

use serde_json::Value;
use std::collections::HashMap;

/// Join key: (artist, song title, duration bits)
///
/// Durations compare by bit pattern, which is exact equality for the
/// non-NaN values that reach this point.
type TrackKey = (String, String, u64);

fn key_from(record: &Value, artist: &str, title: &str, duration: &str) -> Option<TrackKey> {
    let artist = record.get(artist)?.as_str()?;
    let title = record.get(title)?.as_str()?;
    let duration = record.get(duration)?.as_f64()?;
    // SQL comparison semantics: null and NaN never match
    if duration.is_nan() {
        return None;
    }
    Some((artist.to_string(), title.to_string(), duration.to_bits()))
}

/// Inner-join events to tracks on exact (artist, song, length) equality
///
/// Event side keys on (`artist`, `song`, `length`); track side keys on
/// (`artist_name`, `title`, `duration`). Any mismatch (casing, a trailing
/// space, a rounding difference in the duration) excludes the pair. An
/// event matching several tracks yields one pair per match. Pairs come back
/// in event order, then track order, so output is deterministic.
pub fn inner_join_on_track<'a>(
    events: &'a [Value],
    tracks: &'a [Value],
) -> Vec<(&'a Value, &'a Value)> {
    let mut by_key: HashMap<TrackKey, Vec<&Value>> = HashMap::new();
    for track in tracks {
        if let Some(key) = key_from(track, "artist_name", "title", "duration") {
            by_key.entry(key).or_default().push(track);
        }
    }

    let mut pairs = Vec::new();
    for event in events {
        let Some(key) = key_from(event, "artist", "song", "length") else {
            continue;
        };
        if let Some(matches) = by_key.get(&key) {
            for track in matches {
                pairs.push((event, *track));
            }
        }
    }

    pairs
}
