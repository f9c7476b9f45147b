//! Timestamp derivation and calendar fields

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;

// ============================================================================
// Timezone
// ============================================================================

/// Timezone used to interpret event instants as calendar dates
///
/// The original run derived calendar fields in the execution host's local
/// zone, so `Local` is the default; `Utc` gives host-independent output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EventTimeZone {
    /// The execution host's local zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

impl EventTimeZone {
    /// Derive calendar fields from an epoch-millisecond instant
    ///
    /// Returns `None` when the instant is outside the representable range.
    pub fn parts(self, millis: i64) -> Option<TimeParts> {
        let utc: DateTime<Utc> = DateTime::from_timestamp_millis(millis)?;
        match self {
            EventTimeZone::Utc => Some(TimeParts::of(&utc)),
            EventTimeZone::Local => Some(TimeParts::of(&utc.with_timezone(&Local))),
        }
    }
}

impl std::fmt::Display for EventTimeZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventTimeZone::Local => f.write_str("local"),
            EventTimeZone::Utc => f.write_str("utc"),
        }
    }
}

// ============================================================================
// Calendar Fields
// ============================================================================

/// The six calendar fields derived from an event instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Day of month, 1-31
    pub day: u32,
    /// ISO week of year, 1-53
    pub week: u32,
    /// Month, 1-12
    pub month: u32,
    /// Calendar year
    pub year: i32,
    /// Day of week, Sunday=1 through Saturday=7
    pub weekday: u32,
}

impl TimeParts {
    fn of<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            hour: dt.hour(),
            day: dt.day(),
            week: dt.iso_week().week(),
            month: dt.month(),
            year: dt.year(),
            weekday: dt.weekday().num_days_from_sunday() + 1,
        }
    }
}

// ============================================================================
// Time Table Rows
// ============================================================================

/// Build the `time` dimension rows from filtered events
///
/// One row per distinct `ts` value, in first-occurrence order. Every output
/// field derives from the timestamp, so deduplicating on `ts` deduplicates
/// the full seven-field tuple. Events with a missing or out-of-range `ts`
/// collapse into at most one all-null row.
pub fn time_rows(events: &[Value], timezone: EventTimeZone) -> Vec<Value> {
    let mut seen: HashSet<Option<i64>> = HashSet::new();
    let mut rows = Vec::new();

    for event in events {
        let ts = event.get("ts").and_then(Value::as_i64);
        if !seen.insert(ts) {
            continue;
        }

        let row = match ts.and_then(|millis| timezone.parts(millis).map(|p| (millis, p))) {
            Some((millis, parts)) => json!({
                "timestamp": millis,
                "hour": parts.hour,
                "day": parts.day,
                "week": parts.week,
                "month": parts.month,
                "year": parts.year,
                "weekday": parts.weekday,
            }),
            None => json!({
                "timestamp": null,
                "hour": null,
                "day": null,
                "week": null,
                "month": null,
                "year": null,
                "weekday": null,
            }),
        };
        rows.push(row);
    }

    rows
}
