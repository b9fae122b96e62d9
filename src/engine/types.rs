//! Engine types
//!
//! Run summaries, emitted as one JSON message per command.

use crate::sink::UpsertReport;
use serde::Serialize;
use std::path::PathBuf;

/// Result of a CSV export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    /// Raw records returned by the API
    pub records_fetched: usize,
    /// Data rows written (header excluded)
    pub rows_written: usize,
    /// Target file
    pub output: PathBuf,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Result of a store sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Raw records returned by the API
    pub records_fetched: usize,
    /// Per-record outcome counts
    #[serde(flatten)]
    pub report: UpsertReport,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// A message printed by the CLI
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// CSV export finished
    Export(ExportStats),
    /// Store sync finished
    Sync(SyncStats),
    /// A list of output records
    Records {
        /// What the records are
        stream: String,
        /// Records in output order
        records: Vec<serde_json::Value>,
    },
}

impl Message {
    /// Wrap serializable records in a `RECORDS` message
    pub fn records<T: Serialize>(
        stream: impl Into<String>,
        records: &[T],
    ) -> serde_json::Result<Self> {
        Ok(Self::Records {
            stream: stream.into(),
            records: records
                .iter()
                .map(serde_json::to_value)
                .collect::<serde_json::Result<_>>()?,
        })
    }
}
