// src/checker/mod.rs
// =============================================================================
// This module contains all of the site checks.
//
// Submodules:
// - http: Shared client setup and the GET helper every check uses
// - preview: Fetches data endpoints and previews their bodies
// - html: Lists the <a> elements of a page
// - deploy: Validates a deployed site (status, CDN headers, content, timing)
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod deploy;
mod html;
mod http;
mod preview;

// Re-export public items from submodules
// This lets users write `checker::build_client()` instead of
// `checker::http::build_client()`
pub use deploy::{validate_deployment, ValidationError, ValidationReport};
pub use html::{check_site_structure, DEFAULT_SITE};
pub use http::build_client;
pub use preview::{fetch_previews, FetchOutcome, DEFAULT_DATA_SOURCES};

// Returns the address of a mock server that has already shut down, so
// connecting to it is refused
#[cfg(test)]
pub(crate) async fn closed_server_uri() -> String {
    // builder().start() is not pooled: dropping it really closes the port
    let server = wiremock::MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);
    uri
}
