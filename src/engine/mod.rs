//! Execution engine module
//!
//! Fetch, transform, write. Each run fetches every page first, flattens the
//! whole batch, then hands it to one sink. A record that fails to flatten
//! aborts the run before anything is written.
//!
//! # Overview
//!
//! - `export_sleep` - WHOOP sleeps to a CSV file
//! - `sync_sleep` - WHOOP sleeps into a `RecordStore`, skipping known ids
//! - `chart_data` - stored activity records reshaped for charting

mod types;

pub use types::{ExportStats, Message, SyncStats};

use crate::error::Result;
use crate::sink::{upsert_all, write_csv, RecordStore};
use crate::transform::{flatten_sleep, ChartPoint, DateRange, SleepRecord};
use crate::types::JsonObject;
use crate::whoop::WhoopClient;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Export the sleeps in `range` to `output`, replacing the file
pub async fn export_sleep(
    client: &WhoopClient,
    range: &DateRange,
    output: &Path,
) -> Result<ExportStats> {
    let started = Instant::now();

    let raw = client.get_sleep_collection(range).await?;
    let records = flatten_sleep(&raw)?;
    let rows_written = write_csv(output, SleepRecord::HEADERS, &records)?;

    info!("Wrote {} rows to {}", rows_written, output.display());

    Ok(ExportStats {
        records_fetched: raw.len(),
        rows_written,
        output: output.to_path_buf(),
        duration_ms: elapsed_ms(started),
    })
}

/// Push the sleeps in `range` into `store`.
///
/// Sleeps whose `ID` is already stored are skipped, so repeating a sync over
/// the same range inserts nothing new. Per-record store failures are counted
/// in the report; fetch and flatten failures are returned.
pub async fn sync_sleep<S>(client: &WhoopClient, store: &S, range: &DateRange) -> Result<SyncStats>
where
    S: RecordStore + ?Sized,
{
    let started = Instant::now();

    let raw = client.get_sleep_collection(range).await?;
    let fields = flatten_sleep(&raw)?
        .iter()
        .map(SleepRecord::to_fields)
        .collect::<Result<Vec<JsonObject>>>()?;

    let report = upsert_all(store, SleepRecord::KEY_FIELD, fields).await;
    info!(
        "Sync finished: {} created, {} skipped, {} failed",
        report.created, report.skipped, report.failed
    );

    Ok(SyncStats {
        records_fetched: raw.len(),
        report,
        duration_ms: elapsed_ms(started),
    })
}

/// Every stored record as a chart point, in store order
pub async fn chart_data<S>(store: &S) -> Result<Vec<ChartPoint>>
where
    S: RecordStore + ?Sized,
{
    let records = store.list().await?;
    Ok(records
        .iter()
        .map(|r| ChartPoint::from_fields(&r.fields))
        .collect())
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests;
