//! Sink module
//!
//! Where flattened records end up.
//!
//! # Overview
//!
//! - `CsvWriter` / `write_csv` - overwrite a local file, header row first
//! - `RecordStore` - keyed remote store with query/create/list
//! - `AirtableStore` - `RecordStore` over the Airtable REST API
//! - `MemoryStore` - in-process `RecordStore`
//! - `upsert_all` - insert-if-absent for a batch, one record at a time

mod airtable;
mod store;
mod tabular;
mod upsert;

pub use airtable::AirtableStore;
pub use store::{Filter, MemoryStore, RecordStore, StoredRecord};
pub use tabular::{write_csv, CsvWriter};
pub use upsert::{upsert_all, upsert_one, UpsertOutcome, UpsertReport};
