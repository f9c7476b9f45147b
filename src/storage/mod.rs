//! Storage module
//!
//! Object-storage access for input and output locations.
//!
//! # Overview
//!
//! This module provides:
//! - URL parsing into an `object_store` backend (S3 or local filesystem)
//! - Recursive listing of JSON input files
//! - Reads, writes, and prefix deletion for full-overwrite output

mod location;

pub use location::StorageLocation;
