// src/checker/deploy.rs
// =============================================================================
// This module validates a deployed website.
//
// Checks, in order (the first failure stops everything):
// 1. The page answers with exactly HTTP 200
// 2. Which CDN headers are present (informational only, never fails)
// 3. The body looks like HTML (contains "html" or "body")
// 4. How long the request took
//
// Progress lines go to any io::Write so tests can capture them.
// Failure lines are produced by ValidationError::failure_line().
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::io::Write;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

use super::http::{fetch_page, parse_target};

/// Response headers commonly set by CDNs, printed when present
pub const CDN_HEADERS: [&str; 5] = [
    "x-cache",
    "cf-ray",
    "x-fastly-request-id",
    "x-amz-cf-id",
    "server",
];

/// Substrings that mark a body as HTML
const HTML_MARKERS: [&str; 2] = ["html", "body"];

// Everything a successful validation found out
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub status: u16,
    /// CDN headers that were present, in CDN_HEADERS order
    pub cdn_headers: Vec<(String, String)>,
    /// Time from sending the request until the body was read
    pub elapsed_ms: u128,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("HTML not found in response")]
    MissingMarkup,

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("could not write report: {0}")]
    Output(#[from] std::io::Error),
}

impl ValidationError {
    /// The line printed to stderr for this failure
    pub fn failure_line(&self) -> String {
        match self {
            ValidationError::Status(code) => format!("❌ Status: {}", code),
            ValidationError::MissingMarkup => "❌ Content: HTML not found in response".to_string(),
            other => format!("❌ Validation failed: {}", other),
        }
    }
}

/// Request headers that ask every cache on the way to go to the origin
fn cache_busting_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}

/// True when the body contains any of the HTML markers
pub fn looks_like_html(body: &str) -> bool {
    HTML_MARKERS.iter().any(|marker| body.contains(marker))
}

/// Present CDN headers as (name, value) pairs
///
/// Values that are not valid UTF-8 are converted lossily instead of dropped.
pub fn cdn_headers_present(headers: &HeaderMap) -> Vec<(String, String)> {
    CDN_HEADERS
        .iter()
        .filter_map(|name| {
            headers.get(*name).map(|value| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
        })
        .collect()
}

/// Runs every deployment check against `url`
///
/// Success lines are written to `out` as each step passes. On the first
/// failure the matching error is returned and later steps never run.
pub async fn validate_deployment<W: Write>(
    client: &Client,
    url: &str,
    out: &mut W,
) -> Result<ValidationReport, ValidationError> {
    writeln!(out, "Validating deployment at: {}", url)?;

    let target = parse_target(url)?;

    let start = Instant::now();
    let page = fetch_page(client, target.as_str(), cache_busting_headers()).await?;
    let elapsed_ms = start.elapsed().as_millis();

    debug!(status = page.status, elapsed_ms = elapsed_ms as u64, "deployment responded");

    if page.status != 200 {
        return Err(ValidationError::Status(page.status));
    }
    writeln!(out, "✅ Status: 200 OK")?;

    let cdn_headers = cdn_headers_present(&page.headers);
    writeln!(out, "Headers check:")?;
    for (name, value) in &cdn_headers {
        writeln!(out, "  - {}: {}", name, value)?;
    }

    if !looks_like_html(&page.body) {
        return Err(ValidationError::MissingMarkup);
    }
    writeln!(out, "✅ Content: HTML detected")?;

    writeln!(out, "⏱️ Response time: {}ms", elapsed_ms)?;
    writeln!(out, "🚀 Deployment validation successful!")?;

    Ok(ValidationReport {
        status: page.status,
        cdn_headers,
        elapsed_ms,
    })
}
