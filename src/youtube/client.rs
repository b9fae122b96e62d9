//! Subscriptions client

use crate::auth::AuthConfig;
use crate::config::YoutubeConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{fetch_all, CursorPaginator, MissingRecords};
use crate::transform::Subscription;
use crate::types::StringMap;
use serde_json::Value;
use tracing::info;

const SUBSCRIPTIONS_PATH: &str = "subscriptions";

/// Client for the YouTube Data API
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    client: HttpClient,
    paginator: CursorPaginator,
    part: String,
}

impl YoutubeClient {
    /// Create a client; fails when no API key is configured
    pub fn new(config: &YoutubeConfig) -> Result<Self> {
        let http = HttpClientConfig::builder().base_url(&config.api_url).build();
        let client = HttpClient::with_auth(http, AuthConfig::query_key("key", config.api_key()?))?;

        // A channel with no subscriptions may omit `items` entirely.
        let paginator = CursorPaginator::new("pageToken", "nextPageToken", "items")
            .with_limit("maxResults", config.max_results)
            .with_missing_records(MissingRecords::DefaultEmpty);

        Ok(Self {
            client,
            paginator,
            part: config.part.clone(),
        })
    }

    /// Raw subscription resources of `channel_id`, every page
    pub async fn fetch_subscription_items(&self, channel_id: &str) -> Result<Vec<Value>> {
        let mut params = StringMap::new();
        params.insert("part".to_string(), self.part.clone());
        params.insert("channelId".to_string(), channel_id.to_string());

        fetch_all(&self.client, SUBSCRIPTIONS_PATH, params, &self.paginator).await
    }

    /// Subscriptions of `channel_id`, reshaped
    pub async fn fetch_subscriptions(&self, channel_id: &str) -> Result<Vec<Subscription>> {
        let items = self.fetch_subscription_items(channel_id).await?;
        info!("Fetched {} subscriptions for channel {}", items.len(), channel_id);
        Ok(items.iter().map(Subscription::from_item).collect())
    }
}
