//! Partition module
//!
//! Hive-style partition routing for dataset writes: records are grouped by
//! the values of their partition columns, each group landing in its own
//! `col=value/` directory with the partition columns stripped from the
//! file contents.

mod hive;

pub use hive::{HivePartitioner, HIVE_DEFAULT_PARTITION};
