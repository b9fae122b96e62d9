//! Common types used throughout personal-sync
//!
//! This module contains shared type aliases and the dot-path lookup used
//! to read fields out of raw API responses.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Path Lookup
// ============================================================================

/// Look up a value by dot-separated path (`"score.stage_summary"`).
///
/// A leading `$.` is accepted and ignored. Returns `None` as soon as a
/// segment is missing or traverses a non-object.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Like [`lookup`], but a missing path is an [`Error::MissingField`].
///
/// JSON `null` counts as missing.
pub fn require<'a>(value: &'a Value, path: &str) -> Result<&'a Value> {
    match lookup(value, path) {
        Some(Value::Null) | None => Err(Error::missing_field(path)),
        Some(v) => Ok(v),
    }
}

/// Read a required string field.
pub fn require_str<'a>(value: &'a Value, path: &str) -> Result<&'a str> {
    require(value, path)?
        .as_str()
        .ok_or_else(|| Error::invalid_field(path, "expected a string"))
}

/// Read a required integer field.
pub fn require_i64(value: &Value, path: &str) -> Result<i64> {
    require(value, path)?
        .as_i64()
        .ok_or_else(|| Error::invalid_field(path, "expected an integer"))
}

/// Read a required numeric field, keeping its JSON representation.
pub fn require_number(value: &Value, path: &str) -> Result<serde_json::Number> {
    match require(value, path)? {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(Error::invalid_field(path, "expected a number")),
    }
}
