// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # personal-sync
//!
//! Pulls personal data out of external HTTP APIs and puts it somewhere
//! useful: WHOOP sleeps into a CSV file or an Airtable table, YouTube
//! subscriptions and Airtable activity records out through a small HTTP API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use personal_sync::config::AppConfig;
//! use personal_sync::sink::AirtableStore;
//! use personal_sync::transform::DateRange;
//! use personal_sync::whoop::WhoopClient;
//!
//! # async fn run() -> personal_sync::Result<()> {
//! let config = AppConfig::load(None, std::env::vars())?;
//!
//! let client = WhoopClient::authenticate(&config.whoop).await?;
//! let store = AirtableStore::new(&config.airtable)?;
//! let range = DateRange::last_days(chrono::Utc::now().date_naive(), 4);
//!
//! let stats = personal_sync::engine::sync_sleep(&client, &store, &range).await?;
//! println!("{} created, {} skipped", stats.report.created, stats.report.skipped);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │            cli (whoop-export, whoop-sync, serve, ...)         │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┴───────────────────────────────┐
//! │      engine: fetch every page → flatten → write one sink      │
//! └──────────┬────────────────────┬────────────────────┬──────────┘
//!            │                    │                    │
//! ┌──────────┴─────────┐ ┌────────┴────────┐ ┌─────────┴──────────┐
//! │ whoop / youtube    │ │ transform       │ │ sink               │
//! │ pagination         │ │ timezone, ms→s  │ │ CSV, Airtable,     │
//! │ http, auth         │ │ SleepRecord     │ │ upsert             │
//! └────────────────────┘ └─────────────────┘ └────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client
pub mod http;

/// Continuation-token pagination
pub mod pagination;

/// Raw record to flat record conversions
pub mod transform;

/// CSV and record store sinks
pub mod sink;

/// WHOOP developer API client
pub mod whoop;

/// YouTube Data API client
pub mod youtube;

/// Fetch-transform-write runs
pub mod engine;

/// Application configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::AppConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
