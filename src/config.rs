//! Runtime configuration: which site to read and how long to wait.
//!
//! Configuration is layered:
//! 1. Built-in defaults (CNN Lite)
//! 2. An optional YAML file passed with `--config`
//! 3. Command-line flags and their environment variables
//!
//! # Example file
//!
//! ```yaml
//! site:
//!   base_url: https://example.test
//!   teaser_selector: ".teaser a"
//!   content_selector: ".story-body"
//! timeouts:
//!   link_wait: 10000
//! strict: true
//! ```

use crate::cli::Cli;
use crate::driver::WaitUntil;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Where the latest article lives and how its pages are marked up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteProfile {
    /// Origin that relative teaser links are resolved against.
    pub base_url: String,
    /// Page listing the feed; the base URL when unset.
    pub homepage: Option<String>,
    /// Matches article teaser links on the homepage, newest first.
    pub teaser_selector: String,
    pub title_selector: String,
    pub article_selector: String,
    pub content_selector: String,
    pub main_selector: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            base_url: "https://lite.cnn.com".to_string(),
            homepage: None,
            teaser_selector: ".card--lite a".to_string(),
            title_selector: "h1".to_string(),
            article_selector: "article".to_string(),
            content_selector: ".article--lite".to_string(),
            main_selector: "main".to_string(),
        }
    }
}

impl SiteProfile {
    pub fn homepage(&self) -> &str {
        self.homepage.as_deref().unwrap_or(&self.base_url)
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: self.base_url.clone(),
            source,
        })
    }
}

/// Per-operation bounds, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Timeouts {
    pub homepage_load: u64,
    pub article_load: u64,
    pub link_wait: u64,
    pub readiness: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            homepage_load: 60_000,
            article_load: 60_000,
            link_wait: 30_000,
            readiness: 15_000,
        }
    }
}

impl Timeouts {
    pub fn homepage_load(&self) -> Duration {
        Duration::from_millis(self.homepage_load)
    }

    pub fn article_load(&self) -> Duration {
        Duration::from_millis(self.article_load)
    }

    pub fn link_wait(&self) -> Duration {
        Duration::from_millis(self.link_wait)
    }

    pub fn readiness(&self) -> Duration {
        Duration::from_millis(self.readiness)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteProfile,
    pub timeouts: Timeouts,
    pub wait_until: WaitUntil,
    /// Treat an empty article body as a failed run.
    pub strict: bool,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteProfile::default(),
            timeouts: Timeouts::default(),
            wait_until: WaitUntil::default(),
            strict: false,
            user_agent: concat!("awful_latest_article/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(path: &str, yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })
    }

    /// Apply command-line overrides on top of file or default values.
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(base_url) = &args.base_url {
            self.site.base_url = base_url.clone();
        }
        if let Some(selector) = &args.teaser_selector {
            self.site.teaser_selector = selector.clone();
        }
        if let Some(user_agent) = &args.user_agent {
            self.user_agent = user_agent.clone();
        }
        if args.strict {
            self.strict = true;
        }
        self
    }
}

/// Build the effective configuration for this invocation.
///
/// Fails when the config file cannot be read or parsed, or when the
/// resulting base URL is not an absolute URL.
#[instrument(level = "info", skip_all, fields(config = ?args.config))]
pub async fn load(args: &Cli) -> Result<Config, ConfigError> {
    let config = match &args.config {
        Some(path) => {
            let yaml = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
            info!(%path, "Loaded configuration file");
            Config::from_yaml(path, &yaml)?
        }
        None => Config::default(),
    }
    .with_overrides(args);

    config.site.base_url()?;
    Ok(config)
}
