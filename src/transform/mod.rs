//! Transform module
//!
//! The declarative middle of both pipelines: row filters, column
//! projections, timestamp and calendar-field derivation, and the
//! exact-equality join that matches play events to tracks.

mod join;
mod steps;
mod time;

pub use join::inner_join_on_track;
pub use steps::{filter_page, project};
pub use time::{time_rows, EventTimeZone, TimeParts};
