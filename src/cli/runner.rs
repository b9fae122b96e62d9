//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::AppConfig;
use crate::engine::{self, Message};
use crate::error::Result;
use crate::sink::AirtableStore;
use crate::transform::DateRange;
use crate::whoop::WhoopClient;
use crate::youtube::YoutubeClient;
use chrono::{NaiveDate, Utc};
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: AppConfig,
}

impl Runner {
    /// Create a runner for a parsed command line and a loaded configuration
    pub fn new(cli: Cli, config: AppConfig) -> Self {
        Self { cli, config }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::WhoopExport {
                start,
                end,
                days,
                output,
            } => {
                let range = date_range(start.as_deref(), end.as_deref(), *days)?;
                self.whoop_export(&range, output).await
            }
            Commands::WhoopSync { start, end, days } => {
                let range = date_range(start.as_deref(), end.as_deref(), *days)?;
                self.whoop_sync(&range).await
            }
            Commands::Subscriptions { channel_id } => self.subscriptions(channel_id).await,
            Commands::AirtableData => self.airtable_data().await,
            Commands::Serve { port } => crate::cli::serve(self.config.clone(), *port).await,
        }
    }

    async fn whoop_export(&self, range: &DateRange, output: &Path) -> Result<()> {
        let client = WhoopClient::authenticate(&self.config.whoop).await?;
        let stats = engine::export_sleep(&client, range, output).await?;
        self.output_message(&Message::Export(stats))
    }

    async fn whoop_sync(&self, range: &DateRange) -> Result<()> {
        // Resolve Airtable settings before spending a token request.
        let store = AirtableStore::new(&self.config.airtable)?;
        let client = WhoopClient::authenticate(&self.config.whoop).await?;
        let stats = engine::sync_sleep(&client, &store, range).await?;
        self.output_message(&Message::Sync(stats))
    }

    async fn subscriptions(&self, channel_id: &str) -> Result<()> {
        let client = YoutubeClient::new(&self.config.youtube)?;
        let subscriptions = client.fetch_subscriptions(channel_id).await?;
        self.output_message(&Message::records("subscriptions", &subscriptions)?)
    }

    async fn airtable_data(&self) -> Result<()> {
        let store = AirtableStore::new(&self.config.airtable)?;
        let points = engine::chart_data(&store).await?;
        self.output_message(&Message::records("airtable_data", &points)?)
    }

    fn output_message(&self, msg: &Message) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        println!("{line}");
        Ok(())
    }
}

fn date_range(start: Option<&str>, end: Option<&str>, days: u32) -> Result<DateRange> {
    let today: NaiveDate = Utc::now().date_naive();
    DateRange::parse(start, end, today, days)
}
