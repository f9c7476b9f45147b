//! Row filters and column projections

use serde_json::Value;

/// Keep only events whose `page` field equals the given literal
///
/// Comparison is exact string equality; rows with a missing or non-string
/// `page` are dropped along with every other page type.
pub fn filter_page(records: Vec<Value>, page: &str) -> Vec<Value> {
    records
        .into_iter()
        .filter(|record| record.get("page").and_then(Value::as_str) == Some(page))
        .collect()
}

/// Project records onto `(source, target)` column pairs
///
/// Each output record carries exactly the target columns; a missing source
/// field projects to null. Input order is preserved and duplicates are NOT
/// collapsed: every input row yields exactly one output row.
pub fn project(records: &[Value], columns: &[(&str, &str)]) -> Vec<Value> {
    records
        .iter()
        .map(|record| {
            let mut out = serde_json::Map::with_capacity(columns.len());
            for (source, target) in columns {
                let value = record.get(*source).cloned().unwrap_or(Value::Null);
                out.insert((*target).to_string(), value);
            }
            Value::Object(out)
        })
        .collect()
}
