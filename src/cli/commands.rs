//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sync personal data from WHOOP, YouTube and Airtable
#[derive(Parser, Debug)]
#[command(name = "personal-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON); credentials come from the environment
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export WHOOP sleep records to a CSV file
    WhoopExport {
        /// First day (YYYY-MM-DD); defaults to `--days` before the end
        #[arg(long)]
        start: Option<String>,

        /// Last day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        end: Option<String>,

        /// Days covered when no start is given
        #[arg(long, default_value = "300")]
        days: u32,

        /// CSV file to write (overwritten)
        #[arg(short, long, default_value = "whoop_sleep_data.csv")]
        output: PathBuf,
    },

    /// Push WHOOP sleep records into Airtable, skipping known IDs
    WhoopSync {
        /// First day (YYYY-MM-DD); defaults to `--days` before the end
        #[arg(long)]
        start: Option<String>,

        /// Last day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        end: Option<String>,

        /// Days covered when no start is given
        #[arg(long, default_value = "4")]
        days: u32,
    },

    /// List the subscriptions of a YouTube channel
    Subscriptions {
        /// Channel id (`UC...`)
        channel_id: String,
    },

    /// List Airtable records as chart points
    AirtableData,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "80")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
