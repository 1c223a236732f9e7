// src/checker/html.rs
// =============================================================================
// This module lists the links on an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Unlike a link checker we keep every <a> element exactly as written:
// no URL resolution and no filtering, because the goal is to show the
// page's structure, not to follow it.
//
// Rust concepts:
// - Result<T, E>: For operations that can fail
// - Iterators: For processing collections
// - Option<T>: For an attribute that might be missing
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::header::HeaderMap;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::http::{fetch_page, parse_target};

/// Page inspected when no URL is given on the command line
pub const DEFAULT_SITE: &str = "https://example.com";

// One anchor element found on the page
//
// `href` is None when the element has no href attribute; it is then left
// out of the JSON entirely instead of printing `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Visible text of the element, trimmed
    pub text: String,
    /// Value of the href attribute, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

// Extracts every <a> element from HTML content, in document order
//
// Example:
//   html = "<a href='/docs'> Docs </a><a>Top</a>"
//   result = [{text: "Docs", href: Some("/docs")}, {text: "Top", href: None}]
pub fn extract_link_entries(html: &str) -> Result<Vec<LinkEntry>> {
    let document = Html::parse_document(html);

    let selector =
        Selector::parse("a").map_err(|e| anyhow!("invalid anchor selector: {:?}", e))?;

    let entries = document
        .select(&selector)
        .map(|element| LinkEntry {
            // text() yields every descendant text node; join them first
            text: element.text().collect::<String>().trim().to_string(),
            href: element.value().attr("href").map(str::to_string),
        })
        .collect();

    Ok(entries)
}

// Fetches a page and lists its links
//
// Any failure (bad URL, network error, non-2xx status) is returned as an
// error, so the caller prints either the full list or nothing at all.
pub async fn check_site_structure(client: &Client, url: &str) -> Result<Vec<LinkEntry>> {
    let target = parse_target(url).with_context(|| format!("Invalid URL '{}'", url))?;

    let page = fetch_page(client, target.as_str(), HeaderMap::new())
        .await?
        .ensure_success()?;

    extract_link_entries(&page.body)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why select "a" and not "a[href]"?
//    - "a[href]" would skip anchors without a target
//    - We want the complete list, so missing targets show up as None
//
// 2. What does element.text() return?
//    - An iterator over all text nodes inside the element
//    - <a><b>Hi</b> there</a> yields "Hi" and " there"
//    - collect::<String>() joins them, trim() strips the outer whitespace
//
// 3. What is skip_serializing_if?
//    - A serde attribute that leaves a field out of the output
//    - Option::is_none means "skip it when there is no value"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::http::build_client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_two_anchors_in_document_order() {
        let html = r#"
            <html><body>
              <a href="https://www.rust-lang.org">Rust</a>
              <p>filler</p>
              <a href="/docs">  Docs  </a>
            </body></html>
        "#;
        let entries = extract_link_entries(html).unwrap();
        assert_eq!(
            entries,
            vec![
                LinkEntry {
                    text: "Rust".to_string(),
                    href: Some("https://www.rust-lang.org".to_string()),
                },
                LinkEntry {
                    text: "Docs".to_string(),
                    href: Some("/docs".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_missing_href_is_omitted_from_json() {
        let entries = extract_link_entries("<a name='top'>Top</a>").unwrap();
        assert_eq!(entries[0].href, None);

        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(json, r#"[{"text":"Top"}]"#);
    }

    #[test]
    fn test_nested_text_is_joined() {
        let entries = extract_link_entries("<a href='#x'><b>Hello</b> world </a>").unwrap();
        assert_eq!(entries[0].text, "Hello world");
    }

    #[test]
    fn test_no_anchors() {
        let entries = extract_link_entries("<p>nothing here</p>").unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_check_site_structure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<a href="/a">A</a><a href="/b">B</a>"#),
            )
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let entries = check_site_structure(&client, &server.uri()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].href.as_deref(), Some("/b"));
    }

    #[tokio::test]
    async fn test_error_status_gives_no_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<a href='/x'>x</a>"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let result = check_site_structure(&client, &server.uri()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = build_client().unwrap();
        let err = check_site_structure(&client, "not a url").await.unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }
}
