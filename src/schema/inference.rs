//! Schema inference and permissive coercion
//!
//! Inference scans every record and widens field types as it goes; coercion
//! rebuilds records against a schema, nulling out anything that does not fit
//! the declared type. Together they give schema-on-read semantics: a
//! malformed field becomes a null, never an error.

use crate::error::Result;
use arrow::datatypes::{DataType, Field, Schema};
use serde_json::Value;
use std::collections::BTreeMap;

/// Infer an Arrow schema from a set of JSON records
///
/// Scalar fields only: arrays and objects are treated as text. Fields are
/// sorted by name so the inferred schema is stable across runs.
pub fn infer_schema(records: &[Value]) -> Result<Schema> {
    let mut field_types: BTreeMap<String, DataType> = BTreeMap::new();

    for record in records {
        if let Value::Object(obj) = record {
            for (key, value) in obj {
                let inferred = infer_type(value);
                field_types
                    .entry(key.clone())
                    .and_modify(|existing| {
                        *existing = merge_types(existing, &inferred);
                    })
                    .or_insert(inferred);
            }
        }
    }

    let fields: Vec<Field> = field_types
        .into_iter()
        .map(|(name, dtype)| Field::new(name, dtype, true)) // All fields nullable
        .collect();

    Ok(Schema::new(fields))
}

/// Infer an Arrow DataType from a JSON value
fn infer_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        // Nested values are carried as their JSON text
        Value::String(_) | Value::Array(_) | Value::Object(_) => DataType::Utf8,
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        // Same types
        (a, b) if a == b => a.clone(),

        // Null can merge with anything
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),

        // Numbers can merge (prefer Float64 for mixed)
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }

        // Different types -> fall back to String (most flexible)
        _ => DataType::Utf8,
    }
}

/// Coerce records onto a schema, permissively
///
/// Each output record carries exactly the schema's fields. A field that is
/// absent, or whose value does not fit the declared type, becomes null.
pub fn coerce_records(records: &[Value], schema: &Schema) -> Vec<Value> {
    records
        .iter()
        .map(|record| {
            let mut out = serde_json::Map::with_capacity(schema.fields().len());
            for field in schema.fields() {
                let raw = match record {
                    Value::Object(obj) => obj.get(field.name()),
                    _ => None,
                };
                out.insert(field.name().clone(), coerce_value(raw, field.data_type()));
            }
            Value::Object(out)
        })
        .collect()
}

/// Coerce a single JSON value to a declared type, or null
pub fn coerce_value(value: Option<&Value>, data_type: &DataType) -> Value {
    let Some(value) = value else {
        return Value::Null;
    };
    if value.is_null() {
        return Value::Null;
    }

    match data_type {
        DataType::Boolean => value.as_bool().map_or(Value::Null, Value::Bool),

        DataType::Int64 => value
            .as_i64()
            .map_or(Value::Null, |n| Value::Number(n.into())),

        DataType::Float64 => value
            .as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number),

        // Scalars cast to their text form; nested values stay out
        DataType::Utf8 => match value {
            Value::String(s) => Value::String(s.clone()),
            Value::Number(n) => Value::String(n.to_string()),
            Value::Bool(b) => Value::String(b.to_string()),
            _ => Value::Null,
        },

        // Timestamps arrive as epoch-millisecond integers
        DataType::Timestamp(_, _) => value
            .as_i64()
            .map_or(Value::Null, |n| Value::Number(n.into())),

        _ => Value::Null,
    }
}
