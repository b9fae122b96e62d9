//! Pagination types
//!
//! Defines the token paginator and the per-page data it produces.

use crate::error::{Error, Result};
use crate::types::{lookup, StringMap};
use serde_json::Value;

/// What to do when a response has no records list at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingRecords {
    /// Fail with a lookup error
    #[default]
    Required,
    /// Treat the page as empty
    DefaultEmpty,
}

/// One fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Records in server order
    pub records: Vec<Value>,
    /// Token for the following page, if any
    pub next_token: Option<String>,
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Token to send with the next request
    pub cursor: Option<String>,
    /// Pages fetched so far
    pub pages: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page and move the cursor
    pub fn advance(&mut self, page: &Page) {
        self.pages += 1;
        self.total_fetched += page.records.len() as u64;
        match &page.next_token {
            Some(token) => self.cursor = Some(token.clone()),
            None => {
                self.cursor = None;
                self.done = true;
            }
        }
    }
}

/// Continuation-token pagination (WHOOP `nextToken`, YouTube `pageToken`,
/// Airtable `offset`)
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter that carries the token back to the server
    pub cursor_param: String,
    /// Path of the next token in the response body
    pub cursor_path: String,
    /// Path of the records array in the response body
    pub records_path: String,
    /// Behavior when the records array is absent
    pub missing_records: MissingRecords,
    /// Page-size parameter and value sent with every request
    pub limit: Option<(String, u32)>,
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(
        cursor_param: impl Into<String>,
        cursor_path: impl Into<String>,
        records_path: impl Into<String>,
    ) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            cursor_path: cursor_path.into(),
            records_path: records_path.into(),
            missing_records: MissingRecords::Required,
            limit: None,
        }
    }

    /// Send a page-size limit with every request
    #[must_use]
    pub fn with_limit(mut self, param: impl Into<String>, limit: u32) -> Self {
        self.limit = Some((param.into(), limit));
        self
    }

    /// Set the missing-records policy
    #[must_use]
    pub fn with_missing_records(mut self, policy: MissingRecords) -> Self {
        self.missing_records = policy;
        self
    }

    /// Query parameters for one request: static params, limit, then token
    pub fn request_params(&self, base: &StringMap, state: &PaginationState) -> StringMap {
        let mut params = base.clone();
        if let Some((param, limit)) = &self.limit {
            params.insert(param.clone(), limit.to_string());
        }
        if let Some(cursor) = &state.cursor {
            params.insert(self.cursor_param.clone(), cursor.clone());
        }
        params
    }

    /// Split a response body into its records and next token
    pub fn parse_page(&self, body: &Value) -> Result<Page> {
        let records = match lookup(body, &self.records_path) {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Null) | None => match self.missing_records {
                MissingRecords::Required => {
                    return Err(Error::missing_field(self.records_path.clone()))
                }
                MissingRecords::DefaultEmpty => Vec::new(),
            },
            Some(_) => {
                return Err(Error::invalid_field(
                    self.records_path.clone(),
                    "expected an array of records",
                ))
            }
        };

        Ok(Page {
            records,
            next_token: extract_token(body, &self.cursor_path),
        })
    }
}

/// Read a continuation token. Missing, null and empty values all end
/// pagination.
pub fn extract_token(body: &Value, path: &str) -> Option<String> {
    match lookup(body, path)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
