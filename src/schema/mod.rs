//! Schema module
//!
//! Declared Arrow schemas for both inputs and all five outputs, permissive
//! coercion of JSON records onto a schema, and type inference for the
//! schema-less second read of the track metadata.

mod declared;
mod inference;

pub use declared::{
    artists_schema, log_read_schema, song_read_schema, songplays_schema, songs_schema,
    time_schema, users_schema,
};
pub use inference::{coerce_records, coerce_value, infer_schema};
