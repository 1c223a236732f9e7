// src/checker/preview.rs
// =============================================================================
// This module fetches data endpoints and produces a short preview of each.
//
// Key functionality:
// - Requests every URL at the same time
// - Yields results as they complete (not in request order)
// - A failing URL becomes a Failed outcome; it never stops the others
//
// Rust concepts:
// - Streams: For processing many futures concurrently
// - Enums: To represent success or failure per URL
// - impl Trait: To return a stream without naming its type
// =============================================================================

use futures::stream::{self, Stream, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::header::HeaderMap;
use reqwest::Client;
use tracing::debug;

use super::http::fetch_page;

/// Endpoints checked when no URLs are given on the command line
pub const DEFAULT_DATA_SOURCES: [&str; 3] = [
    "https://jsonplaceholder.typicode.com/posts",
    "https://jsonplaceholder.typicode.com/comments",
    "https://jsonplaceholder.typicode.com/albums",
];

/// Maximum number of characters kept from each body
pub const PREVIEW_CHARS: usize = 200;

// The result of fetching one data source
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Request succeeded; holds the truncated body
    Preview { url: String, text: String },
    /// Request failed; holds the error message
    Failed { url: String, message: String },
}

// Returns at most `limit` characters from the start of `body`
//
// We count chars, not bytes, so a multi-byte character is never cut in half.
pub fn preview(body: &str, limit: usize) -> &str {
    match body.char_indices().nth(limit) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

// Fetches every URL concurrently
//
// All requests start right away (the buffer is as wide as the URL list),
// and outcomes come out of the stream in completion order. Whoever drains
// the stream has waited for every request.
pub fn fetch_previews(client: &Client, urls: Vec<String>) -> impl Stream<Item = FetchOutcome> {
    let width = urls.len().max(1);
    let client = client.clone();

    let futures = urls.into_iter().map(move |url| {
        let client = client.clone(); // Client is cheap to clone (Arc inside)
        async move { fetch_one(&client, url).await }
    });

    stream::iter(futures).buffer_unordered(width)
}

// Fetches a single data source and turns the result into an outcome
async fn fetch_one(client: &Client, url: String) -> FetchOutcome {
    let result = match fetch_page(client, &url, HeaderMap::new()).await {
        Ok(page) => page.ensure_success(),
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(page) => FetchOutcome::Preview {
            text: preview(&page.body, PREVIEW_CHARS).to_string(),
            url,
        },
        Err(e) => {
            debug!(%url, error = %e, "data source failed");
            FetchOutcome::Failed {
                message: e.to_string(),
                url,
            }
        }
    }
}
