//! # Awful Latest Article
//!
//! Fetches the most recently published article from a news homepage and
//! renders it as plain text, HTML, or JSON.
//!
//! ## Features
//!
//! - Picks the first teaser link on the homepage as the latest article
//! - Reads the headline and body with a tiered fallback across page templates
//! - Normalizes body text into stable, whitespace-collapsed lines
//! - Renders a plain-text summary, an escaped HTML document and a JSON record
//!
//! ## Usage
//!
//! ```sh
//! awful_latest_article                          # plain text to stdout
//! awful_latest_article --out ./site/latest.html # HTML + latest.json
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Locating**: Load the homepage and resolve the latest article link
//! 2. **Reading**: Load the article page and extract title and body
//! 3. **Normalizing**: Clean the body into line-oriented text
//! 4. **Output**: Render and print, or write artifacts to disk

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod driver;
mod errors;
mod extractor;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use driver::http::HttpDriver;
use extractor::Extractor;
use outputs::{json, text};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr; stdout is reserved for the render) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("awful_latest_article starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = config::load(&args).await?;
    debug!(?config, "Effective configuration");

    let driver = HttpDriver::new(&config.user_agent);
    let extractor = Extractor::new(driver, config)?;

    let Some(record) = extractor.run().await else {
        error!("No article extracted; nothing written");
        return Err("extraction failed".into());
    };

    match &args.out {
        Some(path) => {
            let json_path = json::write_artifacts(&record, path).await?;
            info!(html = %path.display(), json = %json_path.display(), "Artifacts written");
        }
        None if args.json => println!("{}", serde_json::to_string_pretty(&record)?),
        None => print!("{}", text::render_text(&record)),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
