//! Configuration types
//!
//! Every client takes its configuration explicitly. `AppConfig` is built
//! once at the entry point from an optional JSON file, then overlaid with
//! credentials taken from the environment.

use crate::auth::Credentials;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable for the WHOOP account email
pub const ENV_WHOOP_USERNAME: &str = "WHOOP_USERNAME";
/// Environment variable for the WHOOP account password
pub const ENV_WHOOP_PASSWORD: &str = "WHOOP_PASSWORD";
/// Environment variable for the Airtable personal access token
pub const ENV_AIRTABLE_API_KEY: &str = "AIRTABLE_API_KEY";
/// Environment variable for the Airtable base id
pub const ENV_AIRTABLE_BASE_ID: &str = "AIRTABLE_BASE_ID";
/// Environment variable for the Airtable table name
pub const ENV_AIRTABLE_TABLE_NAME: &str = "AIRTABLE_TABLE_NAME";
/// Environment variable for the YouTube Data API key
pub const ENV_YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub whoop: WhoopConfig,
    pub airtable: AirtableConfig,
    pub youtube: YoutubeConfig,
}

impl AppConfig {
    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load<I>(path: Option<&Path>, env: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env(env))
    }

    /// Overlay credentials from environment variables.
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn with_env<I>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in env {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                ENV_WHOOP_USERNAME => self.whoop.username = Some(value),
                ENV_WHOOP_PASSWORD => self.whoop.password = Some(value),
                ENV_AIRTABLE_API_KEY => self.airtable.api_key = Some(value),
                ENV_AIRTABLE_BASE_ID => self.airtable.base_id = Some(value),
                ENV_AIRTABLE_TABLE_NAME => self.airtable.table_name = Some(value),
                ENV_YOUTUBE_API_KEY => self.youtube.api_key = Some(value),
                _ => {}
            }
        }
        self
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing_config(field))
}

// ============================================================================
// WHOOP
// ============================================================================

/// WHOOP API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhoopConfig {
    /// Host of the OAuth token endpoint (`{auth_url}/oauth/token`)
    pub auth_url: String,
    /// Base URL of the developer API
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Records per page
    pub page_limit: u32,
}

impl Default for WhoopConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://api-7.whoop.com".to_string(),
            api_url: "https://api.prod.whoop.com/developer".to_string(),
            username: None,
            password: None,
            page_limit: 25,
        }
    }
}

impl WhoopConfig {
    /// Token endpoint URL
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.auth_url.trim_end_matches('/'))
    }

    /// Account credentials, if both are configured
    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials::new(
            required(&self.username, "whoop.username")?,
            required(&self.password, "whoop.password")?,
        ))
    }
}

// ============================================================================
// Airtable
// ============================================================================

/// Airtable table settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AirtableConfig {
    /// REST API root (`https://api.airtable.com/v0`)
    pub api_url: String,
    pub api_key: Option<String>,
    pub base_id: Option<String>,
    pub table_name: Option<String>,
    /// Records per list/query page (Airtable allows at most 100)
    pub page_size: u32,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.airtable.com/v0".to_string(),
            api_key: None,
            base_id: None,
            table_name: None,
            page_size: 100,
        }
    }
}

impl AirtableConfig {
    pub fn api_key(&self) -> Result<&str> {
        required(&self.api_key, "airtable.api_key")
    }

    pub fn base_id(&self) -> Result<&str> {
        required(&self.base_id, "airtable.base_id")
    }

    pub fn table_name(&self) -> Result<&str> {
        required(&self.table_name, "airtable.table_name")
    }
}

// ============================================================================
// YouTube
// ============================================================================

/// YouTube Data API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    /// API root (`https://www.googleapis.com/youtube/v3`)
    pub api_url: String,
    pub api_key: Option<String>,
    /// `part` parameter of `subscriptions.list`
    pub part: String,
    /// Page size; 50 is the API maximum
    pub max_results: u32,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_url: "https://www.googleapis.com/youtube/v3".to_string(),
            api_key: None,
            part: "snippet,contentDetails,id,subscriberSnippet".to_string(),
            max_results: 50,
        }
    }
}

impl YoutubeConfig {
    pub fn api_key(&self) -> Result<&str> {
        required(&self.api_key, "youtube.api_key")
    }
}
