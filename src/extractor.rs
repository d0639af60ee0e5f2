//! Extraction run: homepage → latest link → article page → record.
//!
//! A run moves through these stages, and any of them can fail:
//!
//! ```text
//! Init → HomepageLoaded → LinkResolved → ArticlePageLoaded → ContentResolved → Done
//! ```
//!
//! Every run opens its own driver session and closes it on every exit path.
//! Failures are logged and turned into "no record"; there are no retries and
//! no partially filled records.

use crate::config::Config;
use crate::driver::{Driver, LoadOptions, Session};
use crate::errors::{ConfigError, DriverError, ExtractError};
use crate::models::ArticleRecord;
use crate::scrapers::content::ContentResolver;
use crate::scrapers::latest_link::LatestLinkResolver;
use crate::utils::normalize_text;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Last stage a run reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    HomepageLoaded,
    LinkResolved,
    ArticlePageLoaded,
    ContentResolved,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Runs the extraction pipeline against one driver.
#[derive(Debug)]
pub struct Extractor<D> {
    driver: D,
    config: Config,
    links: LatestLinkResolver,
    content: ContentResolver,
}

impl<D: Driver> Extractor<D> {
    /// Fails only when the configured base URL is not absolute.
    pub fn new(driver: D, config: Config) -> Result<Self, ConfigError> {
        let links = LatestLinkResolver::new(
            config.site.base_url()?,
            config.site.teaser_selector.clone(),
            config.timeouts.link_wait(),
        );
        let content = ContentResolver::new(&config.site, config.timeouts.readiness());
        Ok(Self {
            driver,
            config,
            links,
            content,
        })
    }

    /// Extract the latest article, or `None` when any stage failed.
    pub async fn run(&self) -> Option<ArticleRecord> {
        self.try_run().await.ok()
    }

    /// Like [`run`](Self::run), keeping the reason for a failed run.
    #[instrument(level = "info", skip_all, fields(homepage = %self.config.site.homepage()))]
    pub async fn try_run(&self) -> Result<ArticleRecord, ExtractError> {
        let started = Instant::now();
        let mut session = match self.driver.open_session().await {
            Ok(session) => session,
            Err(e) => {
                let e = ExtractError::Session(e);
                error!(stage = %Stage::Init, error = %e, "Extraction failed");
                return Err(e);
            }
        };

        let mut stage = Stage::Init;
        let outcome = self.extract(&mut session, &mut stage).await;

        if let Err(e) = session.close().await {
            warn!(error = %e, "Failed to close driver session");
        } else {
            debug!("Driver session closed");
        }

        match &outcome {
            Ok(record) => info!(
                url = %record.url,
                title = %record.title,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Extraction complete"
            ),
            Err(e) => error!(%stage, error = %e, "Extraction failed"),
        }
        outcome
    }

    async fn extract(
        &self,
        session: &mut D::Session,
        stage: &mut Stage,
    ) -> Result<ArticleRecord, ExtractError> {
        let timeouts = &self.config.timeouts;

        let homepage = self
            .load(session, self.config.site.homepage(), timeouts.homepage_load())
            .await?;
        *stage = Stage::HomepageLoaded;

        let article_url = self.links.resolve(&homepage).await?;
        drop(homepage);
        *stage = Stage::LinkResolved;

        let article = self
            .load(session, &article_url, timeouts.article_load())
            .await?;
        *stage = Stage::ArticlePageLoaded;

        let content = self.content.resolve(&article).await;
        *stage = Stage::ContentResolved;

        let text = normalize_text(&content.text);
        if text.is_empty() && self.config.strict {
            return Err(ExtractError::EmptyContent { url: article_url });
        }

        let record = ArticleRecord::stamped(content.title, article_url, text);
        *stage = Stage::Done;
        Ok(record)
    }

    async fn load(
        &self,
        session: &mut D::Session,
        url: &str,
        bound: Duration,
    ) -> Result<<D::Session as Session>::Page, ExtractError> {
        let options = LoadOptions {
            wait_until: self.config.wait_until,
            timeout: bound,
        };
        debug!(%url, ?bound, "Loading page");
        match tokio::time::timeout(bound, session.load_page(url, options)).await {
            Ok(Ok(page)) => Ok(page),
            Ok(Err(source)) => Err(ExtractError::Navigation {
                url: url.to_string(),
                source,
            }),
            Err(_) => Err(ExtractError::Navigation {
                url: url.to_string(),
                source: DriverError::Timeout(bound),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteProfile, Timeouts};
    use crate::driver::http::HtmlPage;
    use crate::driver::mock::MockDriver;
    use chrono::Utc;

    const HOME: &str = "https://site";
    const ARTICLE: &str = "https://site/b/2";

    fn config() -> Config {
        Config {
            site: SiteProfile {
                base_url: HOME.to_string(),
                teaser_selector: ".teaser".to_string(),
                ..SiteProfile::default()
            },
            timeouts: Timeouts {
                homepage_load: 200,
                article_load: 200,
                link_wait: 50,
                readiness: 50,
            },
            ..Config::default()
        }
    }

    fn homepage() -> HtmlPage {
        HtmlPage::parse(
            HOME,
            r#"<html><body><ul>
                <li><a class="teaser" href="/b/2">Newest</a></li>
                <li><a class="teaser" href="/a/1">Older</a></li>
            </ul></body></html>"#,
        )
    }

    fn article_page() -> HtmlPage {
        HtmlPage::parse(
            ARTICLE,
            "<html><body><h1>Headline</h1><article>Line one\n\n  Line two  </article></body></html>",
        )
    }

    #[tokio::test]
    async fn test_end_to_end_latest_article() {
        let before = Utc::now();
        let driver = MockDriver::default()
            .with_page(HOME, homepage())
            .with_page(ARTICLE, article_page());
        let log = driver.log();

        let record = Extractor::new(driver, config()).unwrap().run().await.unwrap();
        assert_eq!(record.title, "Headline");
        assert_eq!(record.url, "https://site/b/2");
        assert_eq!(record.text, "Line one\nLine two");
        assert!(record.fetched_at >= before && record.fetched_at <= Utc::now());

        let log = log.lock().unwrap();
        assert_eq!(log.loaded, vec![HOME.to_string(), ARTICLE.to_string()]);
        assert_eq!((log.opened, log.closed), (1, 1));
    }

    #[tokio::test]
    async fn test_no_teaser_yields_none_and_closes_session() {
        let driver = MockDriver::default().with_page(HOME, HtmlPage::parse(HOME, "<p>empty</p>"));
        let log = driver.log();
        let extractor = Extractor::new(driver, config()).unwrap();

        let err = extractor.try_run().await.unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }));
        assert!(extractor.run().await.is_none());
        assert_eq!(log.lock().unwrap().closed, 2);
    }

    #[tokio::test]
    async fn test_article_load_failure_still_closes_session() {
        let driver = MockDriver::default()
            .with_page(HOME, homepage())
            .failing_at(ARTICLE);
        let log = driver.log();

        assert!(Extractor::new(driver, config()).unwrap().run().await.is_none());
        let log = log.lock().unwrap();
        assert_eq!(log.loaded, vec![HOME.to_string(), ARTICLE.to_string()]);
        assert_eq!(log.closed, 1);
    }

    #[tokio::test]
    async fn test_hanging_homepage_times_out() {
        let driver = MockDriver::<HtmlPage>::default().hanging_at(HOME);
        let log = driver.log();

        let err = Extractor::new(driver, config())
            .unwrap()
            .try_run()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Navigation { source: DriverError::Timeout(_), .. }
        ));
        assert_eq!(log.lock().unwrap().closed, 1);
    }

    #[tokio::test]
    async fn test_abandoned_run_drops_session_without_close() {
        let driver = MockDriver::<HtmlPage>::default().hanging_at(HOME);
        let log = driver.log();
        let mut slow = config();
        slow.timeouts.homepage_load = 60_000;
        let extractor = Extractor::new(driver, slow).unwrap();

        let abandoned = tokio::time::timeout(Duration::from_millis(50), extractor.try_run()).await;
        assert!(abandoned.is_err());
        let log = log.lock().unwrap();
        assert_eq!((log.opened, log.closed, log.dropped), (1, 0, 1));
    }

    #[tokio::test]
    async fn test_empty_body_is_success_unless_strict() {
        let bare = HtmlPage::parse(ARTICLE, "<h1>Only a title</h1>");
        let driver = MockDriver::default()
            .with_page(HOME, homepage())
            .with_page(ARTICLE, bare);

        let record = Extractor::new(driver.clone(), config()).unwrap().run().await.unwrap();
        assert_eq!(record.title, "Only a title");
        assert_eq!(record.text, "");

        let strict = Config {
            strict: true,
            ..config()
        };
        let err = Extractor::new(driver, strict).unwrap().try_run().await.unwrap_err();
        assert!(matches!(err, ExtractError::EmptyContent { url } if url == ARTICLE));
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let mut bad = config();
        bad.site.base_url = "site".to_string();
        let err = Extractor::new(MockDriver::<HtmlPage>::default(), bad).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }
}
