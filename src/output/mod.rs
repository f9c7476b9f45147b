//! Output module
//!
//! Handles Arrow RecordBatch creation and Parquet encoding.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting JSON records to Arrow RecordBatches against a table schema
//! - Encoding RecordBatches as Parquet file bytes for object storage

mod batch;
mod writer;

pub use batch::records_to_batch;
pub use writer::{batch_to_parquet_bytes, ParquetWriterConfig};
