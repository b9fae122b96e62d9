//! Lazy page stream over a token-paginated endpoint

use super::types::{CursorPaginator, Page, PaginationState};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::StringMap;
use futures::{Stream, TryStreamExt};
use serde_json::Value;
use std::pin::Pin;
use tracing::debug;

/// Pages of one paginated fetch, in server order
pub type PageStream<'a> = Pin<Box<dyn Stream<Item = Result<Page>> + Send + 'a>>;

/// Stream the pages of `url`.
///
/// Nothing is requested until the stream is polled. Each request waits for
/// the previous one and carries `params`, the paginator's limit, and the
/// token from the previous page. The stream ends after a page without a
/// token. An HTTP or decoding error is yielded once and ends the stream.
pub fn page_stream<'a>(
    client: &'a HttpClient,
    url: &'a str,
    params: StringMap,
    paginator: &'a CursorPaginator,
) -> PageStream<'a> {
    let stream = futures::stream::try_unfold(PaginationState::new(), move |mut state| {
        let params = paginator.request_params(&params, &state);
        async move {
            if state.done {
                return Ok(None);
            }

            let body: Value = client
                .get_json_with_config(url, RequestConfig::new().queries(params))
                .await?;
            let page = paginator.parse_page(&body)?;
            state.advance(&page);

            debug!(
                "Page {} of {}: {} records (total {}), more: {}",
                state.pages,
                url,
                page.records.len(),
                state.total_fetched,
                !state.done
            );

            Ok(Some((page, state)))
        }
    });

    Box::pin(stream)
}

/// Concatenate every page's records.
///
/// An error from any page is returned as-is; records already fetched are
/// dropped with the stream.
pub async fn fetch_all(
    client: &HttpClient,
    url: &str,
    params: StringMap,
    paginator: &CursorPaginator,
) -> Result<Vec<Value>> {
    page_stream(client, url, params, paginator)
        .try_fold(Vec::new(), |mut acc, page| async move {
            acc.extend(page.records);
            Ok(acc)
        })
        .await
}
