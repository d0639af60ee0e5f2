//! Command-line interface definitions for Awful Latest Article.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Site overrides can also be provided via environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Awful Latest Article application.
///
/// With no arguments the plain-text render of the latest article is printed
/// to stdout. With `--out` the HTML render is written to that path, and a
/// `latest.json` record is written next to it.
///
/// # Examples
///
/// ```sh
/// # Print the latest CNN Lite article
/// awful_latest_article
///
/// # Write HTML and JSON artifacts
/// awful_latest_article --out ./site/latest.html
///
/// # Another site, described in a config file
/// awful_latest_article --config ./site.yaml --strict
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Write the HTML render to this path (and latest.json beside it)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the JSON record to stdout instead of the plain-text render
    #[arg(long, conflicts_with = "out")]
    pub json: bool,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Homepage origin; relative article links are resolved against it
    #[arg(long, env = "LATEST_ARTICLE_BASE_URL")]
    pub base_url: Option<String>,

    /// CSS selector for article teaser links on the homepage
    #[arg(long, env = "LATEST_ARTICLE_TEASER_SELECTOR")]
    pub teaser_selector: Option<String>,

    /// User-Agent header sent with page requests
    #[arg(long, env = "LATEST_ARTICLE_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Fail when no article text could be extracted
    #[arg(long)]
    pub strict: bool,
}
