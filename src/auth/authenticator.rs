//! Authenticator implementation
//!
//! Applies authentication to requests and performs the password-grant
//! token request.

use super::types::{AuthConfig, Credentials, Location, Token};
use crate::error::{Error, Result};
use crate::types::lookup;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,

            AuthConfig::ApiKey {
                location,
                name,
                value,
            } => match location {
                Location::Header => req.header(name.as_str(), value.as_str()),
                Location::Query => req.query(&[(name.as_str(), value.as_str())]),
            },

            AuthConfig::Bearer { token } => req.bearer_auth(token),
        }
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// Body of a password-grant token request, sent as JSON
#[derive(Serialize)]
struct PasswordGrantBody<'a> {
    username: &'a str,
    password: &'a str,
    grant_type: &'static str,
}

/// OAuth2 resource-owner password grant with a JSON request body
#[derive(Debug, Clone)]
pub struct PasswordGrant {
    token_url: String,
    http_client: Client,
}

impl PasswordGrant {
    /// Create a token provider for the given token endpoint
    pub fn new(token_url: impl Into<String>) -> Self {
        Self::with_client(token_url, Client::new())
    }

    /// Create a token provider with a custom HTTP client
    pub fn with_client(token_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            token_url: token_url.into(),
            http_client,
        }
    }

    /// Exchange credentials for an access token.
    ///
    /// Fails with [`Error::Auth`] when the endpoint rejects the request or
    /// the response carries no `access_token`.
    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<Token> {
        debug!("Requesting token from {}", self.token_url);

        let body = PasswordGrantBody {
            username: &credentials.username,
            password: &credentials.password,
            grant_type: "password",
        };

        let response = self
            .http_client
            .post(&self.token_url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let body: Value = response.json().await.map_err(Error::Http)?;
        parse_token_response(&body)
    }
}

/// Turn a token endpoint response into a [`Token`]
pub(crate) fn parse_token_response(body: &Value) -> Result<Token> {
    let access_token = match lookup(body, "access_token") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(Error::auth("Access token not found in token response")),
    };

    let user_id = match lookup(body, "user.id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Ok(Token {
        access_token,
        expires_in: body.get("expires_in").and_then(Value::as_i64),
        user_id,
    })
}
