//! Decoder implementations
//!
//! Each decoder handles a specific file shape.

use crate::error::{Error, Result};
use serde_json::Value;

/// Trait for turning a file body into a list of JSON records
pub trait RecordDecoder: Send + Sync {
    /// Decode a body into records
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// Whole-body JSON decoder
///
/// A top-level array yields one record per element; any other top-level
/// value yields a single record.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })?;
        match value {
            Value::Array(arr) => Ok(arr),
            other => Ok(vec![other]),
        }
    }
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one JSON object per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let mut records = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line).map_err(|e| Error::Decode {
                message: format!("Failed to parse JSONL at line {}: {e}", line_num + 1),
            })?;

            records.push(value);
        }

        Ok(records)
    }
}

// ============================================================================
// Auto Detection
// ============================================================================

/// Decode a body whose shape is not known up front
///
/// Tries whole-body JSON first, then falls back to JSON Lines. The fallback
/// covers activity logs, where each line is an independent object and the
/// body as a whole is not valid JSON.
pub fn decode_records(body: &str) -> Result<Vec<Value>> {
    match JsonDecoder::new().decode(body) {
        Ok(records) => Ok(records),
        Err(_) => JsonlDecoder::new().decode(body),
    }
}
