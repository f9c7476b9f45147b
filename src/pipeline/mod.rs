//! Pipeline module
//!
//! The two transformation paths and their shared plumbing.
//!
//! # Overview
//!
//! - `CatalogPipeline` - track metadata to `songs` + `artists`
//! - `ActivityPipeline` - activity logs to `users` + `time` + `songplays`
//! - `run_job` - runs catalog then activity against one configuration
//!
//! The pipelines are independent aside from ordering: activity re-reads the
//! track metadata for its join, so catalog conventionally runs first. Each
//! dataset write is a barrier and a full overwrite.

mod activity;
mod catalog;

pub use activity::ActivityPipeline;
pub use catalog::CatalogPipeline;

use crate::config::JobConfig;
use crate::decode::decode_records;
use crate::error::{Error, Result};
use crate::output::{batch_to_parquet_bytes, records_to_batch, ParquetWriterConfig};
use crate::partition::HivePartitioner;
use crate::storage::StorageLocation;
use crate::types::{Dataset, JobStats, JsonValue};
use arrow::datatypes::Schema;
use tracing::{debug, info};

#[cfg(test)]
mod tests;

/// Run the full job: catalog pipeline, then activity pipeline
pub async fn run_job(config: &JobConfig) -> Result<JobStats> {
    config.apply_credentials()?;

    let input = StorageLocation::parse(&config.input_url)?;
    let output = StorageLocation::parse(&config.output_url)?;

    let catalog = CatalogPipeline::new(&input, &output).run().await?;
    let activity = ActivityPipeline::new(&input, &output, config.timezone)
        .run()
        .await?;

    Ok(JobStats { catalog, activity })
}

/// Read and decode every JSON file under a relative prefix
///
/// Returns the concatenated records plus the number of files read. Any
/// unreadable or undecodable file aborts the run.
pub(crate) async fn read_records(
    location: &StorageLocation,
    prefix: &str,
) -> Result<(Vec<JsonValue>, usize)> {
    let files = location.list_json_files(prefix).await?;
    debug!(prefix, files = files.len(), "listed input files");

    let mut records = Vec::new();
    for file in &files {
        let body = location.get(file).await?;
        let text = std::str::from_utf8(&body)
            .map_err(|e| Error::decode(format!("{file}: invalid UTF-8: {e}")))?;
        let decoded =
            decode_records(text).map_err(|e| Error::decode(format!("{file}: {e}")))?;
        records.extend(decoded);
    }

    Ok((records, files.len()))
}

/// Write a dataset as Hive-partitioned Parquet, fully overwriting it
///
/// The destination prefix is cleared first. Partition columns are routed
/// into the directory structure and stripped from file contents; an
/// unpartitioned dataset becomes a single `data.parquet` at the dataset
/// root (written even when empty, so the schema survives). Returns the
/// number of rows written.
pub(crate) async fn write_dataset(
    output: &StorageLocation,
    dataset: Dataset,
    records: Vec<JsonValue>,
    schema: &Schema,
    partition_by: &[&str],
) -> Result<usize> {
    let removed = output.delete_prefix(dataset.name()).await?;
    if removed > 0 {
        debug!(dataset = %dataset, removed, "cleared previous contents");
    }

    let file_schema = if partition_by.is_empty() {
        schema.clone()
    } else {
        Schema::new(
            schema
                .fields()
                .iter()
                .filter(|f| !partition_by.contains(&f.name().as_str()))
                .map(|f| f.as_ref().clone())
                .collect::<Vec<_>>(),
        )
    };

    let writer_config = ParquetWriterConfig::default();
    let mut rows = 0;

    for (dir, group) in HivePartitioner::new(partition_by).split(records) {
        let batch = records_to_batch(&group, &file_schema)?;
        let bytes = batch_to_parquet_bytes(&batch, &writer_config)?;

        let rel_path = if dir.is_empty() {
            format!("{}/data.parquet", dataset.name())
        } else {
            format!("{}/{dir}/data.parquet", dataset.name())
        };
        output.put(&rel_path, bytes).await?;

        rows += group.len();
    }

    info!(dataset = %dataset, rows, "wrote dataset");
    Ok(rows)
}
