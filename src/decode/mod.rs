//! Decode module
//!
//! Turns raw file bodies into JSON records.
//!
//! Track-metadata files hold one JSON object (or one JSON array) each;
//! activity-log files are line-delimited JSON. Decoders for both shapes
//! live here, plus an auto-detecting entry point used by the pipelines.

mod decoders;

pub use decoders::{decode_records, JsonDecoder, JsonlDecoder, RecordDecoder};

#[cfg(test)]
mod tests;
