//! Hive-style partition router

use serde_json::Value;
use std::collections::HashMap;

/// Directory name for null partition values
pub const HIVE_DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

/// Routes records into Hive-style partition directories
///
/// With columns `["year", "artist_id"]`, a record with `year=1984` and
/// `artist_id="AR1"` routes to `year=1984/artist_id=AR1`. Null values route
/// to [`HIVE_DEFAULT_PARTITION`]. With no columns, every record routes to
/// the dataset root.
#[derive(Debug, Clone)]
pub struct HivePartitioner {
    /// Partition column names, outermost directory first
    columns: Vec<String>,
}

impl HivePartitioner {
    /// Create a new partitioner
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// Partition column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Split records into partition groups
    ///
    /// Returns `(relative_dir, records)` pairs in first-occurrence order,
    /// with partition columns removed from each record. The empty relative
    /// dir means the dataset root (unpartitioned).
    pub fn split(&self, records: Vec<Value>) -> Vec<(String, Vec<Value>)> {
        if self.columns.is_empty() {
            return vec![(String::new(), records)];
        }

        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<Value>> = HashMap::new();

        for mut record in records {
            let mut segments = Vec::with_capacity(self.columns.len());
            for column in &self.columns {
                let value = match &mut record {
                    Value::Object(obj) => obj.remove(column).unwrap_or(Value::Null),
                    _ => Value::Null,
                };
                segments.push(format!("{column}={}", partition_value(&value)));
            }
            let dir = segments.join("/");

            if !groups.contains_key(&dir) {
                order.push(dir.clone());
            }
            groups.entry(dir).or_default().push(record);
        }

        order
            .into_iter()
            .map(|dir| {
                let records = groups.remove(&dir).unwrap_or_default();
                (dir, records)
            })
            .collect()
    }
}

/// Format a JSON value as a partition directory component
fn partition_value(value: &Value) -> String {
    match value {
        Value::Null => HIVE_DEFAULT_PARTITION.to_string(),
        Value::String(s) => sanitize(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => sanitize(&other.to_string()),
    }
}

/// Keep partition directory names filesystem- and URL-safe
fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        HIVE_DEFAULT_PARTITION.to_string()
    } else {
        cleaned
    }
}
