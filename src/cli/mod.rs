//! CLI module
//!
//! Command-line interface for the sync jobs.
//!
//! # Commands
//!
//! - `whoop-export` - WHOOP sleeps to CSV
//! - `whoop-sync` - WHOOP sleeps into Airtable
//! - `subscriptions` - YouTube subscriptions of a channel
//! - `airtable-data` - Airtable records as chart points
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve};
