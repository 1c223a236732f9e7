// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, controlled by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code
//
// Exit codes:
//   fetch, structure: always 0 (failures are reported, not fatal)
//   validate: 0 = deployment OK, 1 = any failure or missing URL
//   2 = unexpected internal error
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - the three site checks
mod cli; // src/cli.rs - command-line parsing

use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};
use futures::StreamExt;

use anyhow::Result;
use checker::{FetchOutcome, ValidationError, ValidationReport};
use tracing::info;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr so they never mix with the report on stdout
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { urls } => handle_fetch(urls).await,
        Commands::Structure { url } => handle_structure(&url).await,
        Commands::Validate { url } => handle_validate(url).await,
    }
}

// Handles the 'fetch' subcommand
//
// Outcomes are printed in the order requests finish, and we only return
// once every request has finished.
async fn handle_fetch(urls: Vec<String>) -> Result<i32> {
    let urls = if urls.is_empty() {
        checker::DEFAULT_DATA_SOURCES
            .iter()
            .map(|url| url.to_string())
            .collect()
    } else {
        urls
    };

    let client = checker::build_client()?;

    checker::fetch_previews(&client, urls)
        .for_each(|outcome| async move { print_outcome(&outcome) })
        .await;

    Ok(0)
}

fn print_outcome(outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Preview { url, text } => println!("Data from {}: {}", url, text),
        FetchOutcome::Failed { url, message } => eprintln!("Error with {}: {}", url, message),
    }
}

// Handles the 'structure' subcommand
//
// Prints the whole link list or a single error line, never a partial list.
async fn handle_structure(url: &str) -> Result<i32> {
    let client = checker::build_client()?;

    match checker::check_site_structure(&client, url).await {
        Ok(entries) => {
            let json_output = serde_json::to_string_pretty(&entries)?;
            println!("Site structure: {}", json_output);
        }
        Err(e) => eprintln!("Error fetching site: {:#}", e),
    }

    Ok(0)
}

// Handles the 'validate' subcommand
//
// A missing URL is reported before any client is built, so no request
// is ever made in that case.
async fn handle_validate(url: Option<String>) -> Result<i32> {
    let Some(url) = url else {
        eprintln!("Usage: site-check validate <URL>");
        return Ok(1);
    };

    let result = match checker::build_client() {
        Ok(client) => {
            let mut stdout = std::io::stdout();
            checker::validate_deployment(&client, &url, &mut stdout).await
        }
        Err(e) => Err(ValidationError::from(e)),
    };

    Ok(report_validation(result))
}

// Maps a validation result to the exit code, printing the failure line
//
// Every kind of failure, including a client that could not be built,
// exits with 1.
fn report_validation(result: Result<ValidationReport, ValidationError>) -> i32 {
    match result {
        Ok(report) => {
            info!(
                status = report.status,
                elapsed_ms = report.elapsed_ms as u64,
                cdn_headers = report.cdn_headers.len(),
                "deployment validated"
            );
            0
        }
        Err(e) => {
            eprintln!("{}", e.failure_line());
            1
        }
    }
}
