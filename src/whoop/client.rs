//! Authenticated WHOOP client

use crate::auth::{PasswordGrant, Token};
use crate::config::WhoopConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{fetch_all, CursorPaginator, MissingRecords};
use crate::transform::DateRange;
use crate::types::StringMap;
use serde_json::Value;
use tracing::info;

/// Sleep collection endpoint
pub const SLEEP_PATH: &str = "v1/activity/sleep";
/// Physiological cycle collection endpoint
pub const CYCLE_PATH: &str = "v1/cycle";
/// Workout collection endpoint
pub const WORKOUT_PATH: &str = "v1/activity/workout";

/// Client for one authenticated WHOOP account
#[derive(Debug, Clone)]
pub struct WhoopClient {
    client: HttpClient,
    paginator: CursorPaginator,
    user_id: Option<String>,
}

impl WhoopClient {
    /// Fetch a token with the configured credentials and build a client.
    ///
    /// Fails with `Error::MissingConfigField` when credentials are absent and
    /// `Error::Auth` when the token request is rejected.
    pub async fn authenticate(config: &WhoopConfig) -> Result<Self> {
        let credentials = config.credentials()?;
        let token = PasswordGrant::new(config.token_url())
            .fetch_token(&credentials)
            .await?;

        info!(
            "Authenticated with WHOOP as user {}",
            token.user_id.as_deref().unwrap_or("<unknown>")
        );
        Self::with_token(config, &token)
    }

    /// Build a client around an already issued token
    pub fn with_token(config: &WhoopConfig, token: &Token) -> Result<Self> {
        let http = HttpClientConfig::builder().base_url(&config.api_url).build();
        let client = HttpClient::with_auth(http, token.to_auth_config())?;

        let paginator = CursorPaginator::new("nextToken", "next_token", "records")
            .with_limit("limit", config.page_limit)
            .with_missing_records(MissingRecords::Required);

        Ok(Self {
            client,
            paginator,
            user_id: token.user_id.clone(),
        })
    }

    /// Account id returned with the token
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// All sleeps in `range`, newest first
    pub async fn get_sleep_collection(&self, range: &DateRange) -> Result<Vec<Value>> {
        self.collection(SLEEP_PATH, range).await
    }

    /// All physiological cycles in `range`, newest first
    pub async fn get_cycle_collection(&self, range: &DateRange) -> Result<Vec<Value>> {
        self.collection(CYCLE_PATH, range).await
    }

    /// All workouts in `range`, newest first
    pub async fn get_workout_collection(&self, range: &DateRange) -> Result<Vec<Value>> {
        self.collection(WORKOUT_PATH, range).await
    }

    /// Recovery scored for one cycle
    pub async fn get_recovery_for_cycle(&self, cycle_id: &str) -> Result<Value> {
        self.client
            .get_json(&format!("{CYCLE_PATH}/{cycle_id}/recovery"))
            .await
    }

    async fn collection(&self, path: &str, range: &DateRange) -> Result<Vec<Value>> {
        let mut params = StringMap::new();
        params.insert("start".to_string(), range.start_param());
        params.insert("end".to_string(), range.end_param());

        let records = fetch_all(&self.client, path, params, &self.paginator).await?;
        info!(
            "Fetched {} records from {} ({} to {})",
            records.len(),
            path,
            range.start,
            range.end
        );
        Ok(records)
    }
}
