//! Flattened record schemas

use super::time::{adjust_timezone, millis_to_seconds};
use crate::error::{Error, Result};
use crate::types::{require, require_i64, require_number, require_str, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Record identifier as sent by the provider (WHOOP uses integers)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Read an id from a JSON value
    pub fn from_value(path: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| Error::invalid_field(path, "expected an integer id")),
            Value::String(s) => Ok(Self::Text(s.clone())),
            _ => Err(Error::invalid_field(path, "expected an integer or string id")),
        }
    }

    /// JSON form, as stored in record fields
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::from(*i),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One WHOOP sleep, flattened for export.
///
/// Timestamps are UTC; durations are whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    #[serde(rename = "ID")]
    pub id: RecordId,
    pub timezone_offset: String,
    pub timezone_adjusted_start: String,
    pub timezone_adjusted_end: String,
    pub total_in_bed_time: i64,
    pub total_slow_wave_sleep_time: i64,
    pub total_rem_sleep_time: i64,
    pub sleep_performance_percentage: Number,
    pub need_from_sleep_debt: i64,
}

impl SleepRecord {
    /// Column order of the tabular export
    pub const HEADERS: &'static [&'static str] = &[
        "ID",
        "timezone_offset",
        "timezone_adjusted_start",
        "timezone_adjusted_end",
        "total_in_bed_time",
        "total_slow_wave_sleep_time",
        "total_rem_sleep_time",
        "sleep_performance_percentage",
        "need_from_sleep_debt",
    ];

    /// Field holding the record key in remote stores
    pub const KEY_FIELD: &'static str = "ID";

    /// Flatten one raw sleep record.
    ///
    /// Every field is required: a sleep without `score` data fails with
    /// [`Error::MissingField`] rather than being filled with defaults.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        let offset = require_str(raw, "timezone_offset")?;

        Ok(Self {
            id: RecordId::from_value("id", require(raw, "id")?)?,
            timezone_offset: offset.to_string(),
            timezone_adjusted_start: adjust_timezone(require_str(raw, "start")?, offset)?,
            timezone_adjusted_end: adjust_timezone(require_str(raw, "end")?, offset)?,
            total_in_bed_time: seconds(raw, "score.stage_summary.total_in_bed_time_milli")?,
            total_slow_wave_sleep_time: seconds(
                raw,
                "score.stage_summary.total_slow_wave_sleep_time_milli",
            )?,
            total_rem_sleep_time: seconds(raw, "score.stage_summary.total_rem_sleep_time_milli")?,
            sleep_performance_percentage: require_number(
                raw,
                "score.sleep_performance_percentage",
            )?,
            need_from_sleep_debt: seconds(raw, "score.sleep_needed.need_from_sleep_debt_milli")?,
        })
    }

    /// Record as a JSON field map
    pub fn to_fields(&self) -> Result<JsonObject> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Other("sleep record did not serialize to an object".to_string())),
        }
    }
}

fn seconds(raw: &Value, path: &str) -> Result<i64> {
    require_i64(raw, path).map(millis_to_seconds)
}

/// Flatten a batch of raw sleeps; the first bad record fails the batch.
pub fn flatten_sleep(raw: &[Value]) -> Result<Vec<SleepRecord>> {
    raw.iter().map(SleepRecord::from_raw).collect()
}

/// A YouTube subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
}

impl Subscription {
    /// Reshape one `subscriptionListResponse` item
    pub fn from_item(item: &Value) -> Self {
        let snippet = item.get("snippet");
        let text = |key: &str, fallback: &str| {
            snippet
                .and_then(|s| s.get(key))
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            id: item.get("id").and_then(Value::as_str).map(String::from),
            title: text("title", "No title available"),
            description: text("description", "No description available"),
        }
    }
}

/// One row for the activity chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub activity: String,
    #[serde(rename = "elapsedTime")]
    pub elapsed_time: Number,
}

impl ChartPoint {
    /// Reshape the fields of a stored activity record
    pub fn from_fields(fields: &JsonObject) -> Self {
        let text = |key: &str, fallback: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            date: text("Date", "No Date"),
            activity: text("Activity", "No Activity"),
            elapsed_time: match fields.get("Elapsed Time") {
                Some(Value::Number(n)) => n.clone(),
                _ => Number::from(0),
            },
        }
    }
}
