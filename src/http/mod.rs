//! HTTP client module
//!
//! A thin authenticated wrapper over `reqwest`. Every request is sent once:
//! a non-2xx status becomes `Error::HttpStatus` and is returned to the
//! caller unchanged. There is no retry and no backoff.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

#[cfg(test)]
mod tests;
