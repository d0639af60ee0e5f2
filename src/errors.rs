//! Error taxonomy for the extraction pipeline.
//!
//! Errors are layered:
//! - [`DriverError`]: what the page-rendering driver reports for a single call
//! - [`ExtractError`]: why a run was aborted by the extractor
//! - [`ConfigError`]: why startup configuration could not be built
//!
//! "Extraction degraded" (every content tier came back empty) is not an error;
//! it is logged by the content resolver and the run continues.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single driver operation.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("element is no longer attached to the document")]
    Detached,

    #[error("driver session is closed")]
    Closed,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Reason an extraction run produced no [`ArticleRecord`](crate::models::ArticleRecord).
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not open a driver session: {0}")]
    Session(#[source] DriverError),

    #[error("failed to load {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: DriverError,
    },

    #[error("no latest-article link matching `{selector}`")]
    NotFound { selector: String },

    #[error("timed out after {after:?} waiting for {what}")]
    Timeout { what: String, after: Duration },

    #[error("link `{href}` cannot be resolved against {base}: {source}")]
    InvalidLink {
        href: String,
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error("driver query failed: {0}")]
    Driver(#[from] DriverError),

    #[error("no article text extracted from {url}")]
    EmptyContent { url: String },
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid base url `{value}`: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}
