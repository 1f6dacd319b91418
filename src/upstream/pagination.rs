//! Pagination aggregation.
//!
//! # Responsibilities
//! - Walk a paginated upstream collection page by page
//! - Concatenate every page's `data` array into one flat sequence
//! - Terminate on the upstream's own pagination metadata
//!
//! # Design Decisions
//! - Pages are fetched strictly sequentially; page N+1 is only requested
//!   after page N's metadata says there is one
//! - The termination check runs after appending, so the page that first
//!   satisfies `page >= total_pages` is still included
//! - Absent pagination metadata means "no more pages": exactly one fetch
//! - All-or-nothing: any failed page aborts the run with no partial result
//! - A configured page cap bounds the loop against an upstream whose
//!   metadata never satisfies the termination condition

use serde_json::Value;

use crate::upstream::client::UpstreamClient;
use crate::upstream::error::{UpstreamError, UpstreamResult};

/// Fetch every page of a collection and flatten the results.
///
/// `base_query` pairs are sent with every page request, with `page=N`
/// appended. Returns the accumulated records in page-ascending order,
/// preserving upstream order within each page.
pub async fn fetch_all_pages(
    client: &UpstreamClient,
    path: &str,
    base_query: &[(&str, String)],
    token: &str,
    max_pages: u32,
) -> UpstreamResult<Vec<Value>> {
    let mut items = Vec::new();
    let mut page: u32 = 1;

    loop {
        let mut query: Vec<(&str, String)> = base_query.to_vec();
        query.push(("page", page.to_string()));

        let envelope = client.get_envelope(path, &query, token).await?;
        let total_pages = envelope.total_pages();
        if let Value::Array(records) = envelope.data {
            items.extend(records);
        }

        tracing::debug!(path, page, total_pages, accumulated = items.len(), "Fetched page");

        if page >= total_pages {
            return Ok(items);
        }
        if page >= max_pages {
            tracing::warn!(path, page, total_pages, limit = max_pages, "Aggregation page cap hit");
            return Err(UpstreamError::PageLimit { limit: max_pages });
        }
        page += 1;
    }
}
