//! Insert-if-absent over a record store

use super::store::{Filter, RecordStore, StoredRecord};
use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde::Serialize;
use tracing::{error, info, warn};

/// What happened to one record
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    /// Inserted as a new record
    Created(StoredRecord),
    /// A record with the same key already existed
    Skipped,
}

/// Counts for one `upsert_all` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertReport {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl UpsertReport {
    /// Records seen
    pub fn total(&self) -> usize {
        self.created + self.skipped + self.failed
    }
}

/// Insert each record whose `key_field` value is not yet in `store`.
///
/// Records are handled one at a time, in order. A failed lookup or insert is
/// logged and counted; it never stops the batch.
///
/// The lookup and the insert are two separate requests, so two runs racing
/// on the same store can both miss an existing key and insert it twice.
pub async fn upsert_all<S>(store: &S, key_field: &str, records: Vec<JsonObject>) -> UpsertReport
where
    S: RecordStore + ?Sized,
{
    let mut report = UpsertReport::default();

    for fields in records {
        let key = fields
            .get(key_field)
            .map_or_else(|| "<none>".to_string(), ToString::to_string);

        match upsert_one(store, key_field, fields).await {
            Ok(UpsertOutcome::Created(record)) => {
                info!("Record created: {key_field}={key} as {}", record.id);
                report.created += 1;
            }
            Ok(UpsertOutcome::Skipped) => {
                warn!("Record {key_field}={key} already exists, skipping");
                report.skipped += 1;
            }
            Err(e) => {
                error!("Error creating record {key_field}={key}: {e}");
                report.failed += 1;
            }
        }
    }

    report
}

/// Look up one record by key and insert it if absent
pub async fn upsert_one<S>(store: &S, key_field: &str, fields: JsonObject) -> Result<UpsertOutcome>
where
    S: RecordStore + ?Sized,
{
    let key = fields
        .get(key_field)
        .cloned()
        .ok_or_else(|| Error::store(format!("record has no '{key_field}' field")))?;

    let existing = store.query(&Filter::field_equals(key_field, key)).await?;
    if !existing.is_empty() {
        return Ok(UpsertOutcome::Skipped);
    }

    store.create(fields).await.map(UpsertOutcome::Created)
}
