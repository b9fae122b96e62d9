//! Airtable REST store

use super::store::{Filter, RecordStore, StoredRecord};
use crate::auth::AuthConfig;
use crate::config::AirtableConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{fetch_all, CursorPaginator, MissingRecords};
use crate::types::{JsonObject, StringMap};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

/// One Airtable table, addressed as `{api_url}/{base_id}/{table_name}`
#[derive(Debug, Clone)]
pub struct AirtableStore {
    client: HttpClient,
    table_url: String,
    paginator: CursorPaginator,
}

impl AirtableStore {
    /// Create a store authenticated with the configured access token
    pub fn new(config: &AirtableConfig) -> Result<Self> {
        let client = HttpClient::with_auth(
            HttpClientConfig::default(),
            AuthConfig::bearer(config.api_key()?),
        )?;
        Self::with_client(client, config)
    }

    /// Create a store on an existing client
    pub fn with_client(client: HttpClient, config: &AirtableConfig) -> Result<Self> {
        let table_url = table_url(&config.api_url, config.base_id()?, config.table_name()?)?;

        // Airtable pages via an `offset` token in both request and response.
        let paginator = CursorPaginator::new("offset", "offset", "records")
            .with_limit("pageSize", config.page_size)
            .with_missing_records(MissingRecords::Required);

        Ok(Self {
            client,
            table_url,
            paginator,
        })
    }

    async fn fetch(&self, params: StringMap) -> Result<Vec<StoredRecord>> {
        let raw = fetch_all(&self.client, &self.table_url, params, &self.paginator).await?;
        raw.into_iter()
            .map(|r| serde_json::from_value(r).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl RecordStore for AirtableStore {
    async fn query(&self, filter: &Filter) -> Result<Vec<StoredRecord>> {
        let formula = filter.to_formula();
        debug!("Airtable query: {}", formula);

        let mut params = StringMap::new();
        params.insert("filterByFormula".to_string(), formula);
        self.fetch(params).await
    }

    async fn create(&self, fields: JsonObject) -> Result<StoredRecord> {
        let body: Value = self
            .client
            .request_json(
                Method::POST,
                &self.table_url,
                RequestConfig::new().json(json!({ "fields": fields })),
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn list(&self) -> Result<Vec<StoredRecord>> {
        self.fetch(StringMap::new()).await
    }
}

/// Build `{api_url}/{base}/{table}` with each segment percent-encoded
fn table_url(api_url: &str, base_id: &str, table_name: &str) -> Result<String> {
    let mut url = Url::parse(api_url)?;
    url.path_segments_mut()
        .map_err(|()| Error::invalid_config("airtable.api_url", "URL cannot be a base"))?
        .pop_if_empty()
        .push(base_id)
        .push(table_name);
    Ok(url.to_string())
}
