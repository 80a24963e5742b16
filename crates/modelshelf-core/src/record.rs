//! Helpers for reading fields out of JSON prediction records
//!
//! Predictor inputs and outputs are structured JSON records whose field
//! names are task-specific. These helpers turn a missing or mistyped field
//! into an inference error naming the offending field.

use crate::error::{Error, Result};
use serde_json::Value;

/// Read a required string field from a record
pub fn require_str<'a>(record: &'a Value, field: &str) -> Result<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| missing(field, "string"))
}

/// Read a required array field from a record
pub fn require_array<'a>(record: &'a Value, field: &str) -> Result<&'a Vec<Value>> {
    record
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| missing(field, "array"))
}

fn missing(field: &str, expected: &str) -> Error {
    Error::inference(format!(
        "input record is missing required {} field `{}`",
        expected, field
    ))
}
