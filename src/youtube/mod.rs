//! YouTube Data API v3
//!
//! Only `subscriptions.list` is used. Requests authenticate with an API key
//! sent as the `key` query parameter and page through `pageToken`.

mod client;

pub use client::YoutubeClient;
