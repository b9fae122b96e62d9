//! Pagination module
//!
//! Continuation-token pagination: each response may carry an opaque token
//! naming the next page; a missing, null or empty token ends the collection.
//!
//! # Overview
//!
//! - `CursorPaginator` describes where the token and the records live in a
//!   response and which query parameter carries the token back.
//! - `page_stream` turns an endpoint into a lazy, finite stream of pages.
//!   The stream is consumed once; it stops after the last page or right
//!   after the first error.
//! - `fetch_all` folds a stream into one record list in server order.

mod stream;
mod types;

pub use stream::{fetch_all, page_stream, PageStream};
pub use types::{extract_token, CursorPaginator, MissingRecords, Page, PaginationState};
