// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Each of the three checks is its own subcommand and shares nothing with
// the others except the binary they live in.
// =============================================================================

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "site-check",
    version,
    about = "Preview data endpoints, list a page's links and validate deployed sites",
    long_about = "site-check bundles three quick diagnostics for a website: previewing data \
                  endpoints, listing every link on a page, and validating a deployment \
                  (status, CDN headers, HTML content, response time). \
                  Set RUST_LOG=debug for request-level logging."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch data endpoints and print a short preview of each
    ///
    /// Example: site-check fetch https://jsonplaceholder.typicode.com/users
    Fetch {
        /// URLs to fetch (defaults to the jsonplaceholder posts, comments and albums)
        urls: Vec<String>,
    },

    /// List every link on a page as JSON
    ///
    /// Example: site-check structure https://example.com
    Structure {
        /// Page to inspect
        #[arg(default_value = crate::checker::DEFAULT_SITE)]
        url: String,
    },

    /// Validate a deployed site; exits 1 on any failure
    ///
    /// Example: site-check validate https://my-app.example.com
    Validate {
        /// Deployment URL to validate
        ///
        /// Optional to clap so a missing URL can print our own usage line
        /// and exit with code 1.
        url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_defaults_to_example_com() {
        let cli = Cli::try_parse_from(["site-check", "structure"]).unwrap();
        match cli.command {
            Commands::Structure { url } => assert_eq!(url, "https://example.com"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validate_without_url_still_parses() {
        let cli = Cli::try_parse_from(["site-check", "validate"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { url: None }));
    }

    #[test]
    fn test_fetch_takes_many_urls() {
        let cli = Cli::try_parse_from(["site-check", "fetch", "http://a", "http://b"]).unwrap();
        match cli.command {
            Commands::Fetch { urls } => assert_eq!(urls, vec!["http://a", "http://b"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
