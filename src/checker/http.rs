// src/checker/http.rs
// =============================================================================
// This module holds the HTTP plumbing shared by all three checks.
//
// Key functionality:
// - Builds the one reqwest Client each command uses
// - Validates a target URL before a request is made
// - Makes a GET request and captures status, headers and body together
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E>: For error handling
// - Structs: To group the parts of a response
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::header::HeaderMap;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

// Represents everything we keep from a response
//
// We read the whole body up front so callers can check the status,
// look at headers and search the text without juggling the Response.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP status code (200, 404, ...)
    pub status: u16,
    /// Response headers; lookups are case-insensitive
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

impl PageResponse {
    /// Helper method to check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into an error
    ///
    /// The fetcher and the structure checker treat any non-2xx response
    /// like a failed request, so they both go through here.
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(anyhow!("HTTP {}", self.status))
        }
    }
}

// Creates the HTTP client used for a whole command
//
// One client per invocation, cloned into each task (connection pooling).
// No request timeout and reqwest's default redirect policy (up to 10 hops):
// a slow but healthy site must still pass.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("site-check/", env!("CARGO_PKG_VERSION")))
        .build()
}

// Parses and validates a URL given on the command line
//
// Example:
//   "https://example.com" -> Ok(Url)
//   "not a url"           -> Err(RelativeUrlWithoutBase)
pub fn parse_target(url: &str) -> Result<Url, url::ParseError> {
    Url::parse(url)
}

// Fetches a page with optional extra request headers
//
// Parameters:
//   client: reqwest HTTP client (borrowed, we don't own it)
//   url: the URL to fetch
//   headers: extra request headers (pass HeaderMap::new() for none)
//
// Returns: PageResponse for ANY status code; only transport failures
// (DNS, refused connection, timeout, unreadable body) are errors here.
#[instrument(skip(client, headers))]
pub async fn fetch_page(
    client: &Client,
    url: &str,
    headers: HeaderMap,
) -> reqwest::Result<PageResponse> {
    let response = client.get(url).headers(headers).send().await?;

    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.text().await?;

    debug!(status, bytes = body.len(), "response received");

    Ok(PageResponse {
        status,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_page_keeps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let page = fetch_page(&client, &format!("{}/missing", server.uri()), HeaderMap::new())
            .await
            .unwrap();

        assert_eq!(page.status, 404);
        assert_eq!(page.body, "nope");
        assert!(!page.is_success());
        assert!(page.ensure_success().is_err());
    }

    #[tokio::test]
    async fn test_fetch_page_sends_extra_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("x-probe", "1"))
            .respond_with(ResponseTemplate::new(200).insert_header("X-Cache", "HIT"))
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-probe", HeaderValue::from_static("1"));

        let client = build_client().unwrap();
        let page = fetch_page(&client, &server.uri(), headers).await.unwrap();

        assert_eq!(page.status, 200);
        // Header lookup ignores case
        assert_eq!(page.headers.get("x-cache").unwrap(), "HIT");
    }

    #[test]
    fn test_parse_target() {
        assert!(parse_target("https://example.com").is_ok());
        assert!(parse_target("example.com").is_err());
    }
}
