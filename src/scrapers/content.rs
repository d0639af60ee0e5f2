//! Extract the headline and body text from an article page.
//!
//! Different page templates use different markup, so the body is read from
//! the first content container that yields text, in this order:
//!
//! | Tier | Container |
//! |------|-----------|
//! | 1 | the first `article` element |
//! | 2 | the first element matching the site's content class |
//! | 3 | the page's `main` region |
//! | 4 | nothing: empty body |
//!
//! Each tier is a probe returning `Option<String>`; a driver failure inside a
//! probe only means that tier yielded nothing. Resolution itself never fails.

use crate::config::SiteProfile;
use crate::driver::{Element, Page};
use crate::utils::{RaceOutcome, race_until, truncate_for_log};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Which container the body text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Article,
    ContentClass,
    MainRegion,
    /// Every tier came back empty ("extraction degraded").
    Empty,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentSource::Article => "article",
            ContentSource::ContentClass => "content-class",
            ContentSource::MainRegion => "main",
            ContentSource::Empty => "none",
        };
        f.write_str(name)
    }
}

/// Raw headline and body read from an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// Trimmed headline, empty when the page has none.
    pub title: String,
    /// Unnormalized body text.
    pub text: String,
    pub source: ContentSource,
}

#[derive(Debug, Clone)]
pub struct ContentResolver {
    title_selector: String,
    article_selector: String,
    content_selector: String,
    main_selector: String,
    readiness: Duration,
}

impl ContentResolver {
    pub fn new(site: &SiteProfile, readiness: Duration) -> Self {
        Self {
            title_selector: site.title_selector.clone(),
            article_selector: site.article_selector.clone(),
            content_selector: site.content_selector.clone(),
            main_selector: site.main_selector.clone(),
            readiness,
        }
    }

    /// Read title and body from `page`, degrading to empty strings.
    #[instrument(level = "info", skip_all)]
    pub async fn resolve<P: Page>(&self, page: &P) -> ResolvedContent {
        self.await_readiness(page).await;

        let title = self.title(page).await;
        let tiers = [
            (ContentSource::Article, &self.article_selector),
            (ContentSource::ContentClass, &self.content_selector),
            (ContentSource::MainRegion, &self.main_selector),
        ];
        for (source, selector) in tiers {
            if let Some(text) = probe_text(page, selector).await {
                info!(%source, bytes = text.len(), "Extracted article body");
                return ResolvedContent {
                    title,
                    text,
                    source,
                };
            }
        }

        warn!(
            article = %self.article_selector,
            content = %self.content_selector,
            main = %self.main_selector,
            "Extraction degraded: no content container yielded text"
        );
        ResolvedContent {
            title,
            text: String::new(),
            source: ContentSource::Empty,
        }
    }

    /// Best effort: proceed once either container is visible, or when the
    /// bound elapses, whichever is first.
    async fn await_readiness<P: Page>(&self, page: &P) {
        let waits = vec![
            page.wait_for_visible(&self.article_selector, self.readiness),
            page.wait_for_visible(&self.content_selector, self.readiness),
        ];
        match race_until(waits, self.readiness).await {
            RaceOutcome::Settled { index, ok } => debug!(index, ok, "Readiness wait settled"),
            outcome => debug!(?outcome, "Proceeding without a visible content container"),
        }
    }

    async fn title<P: Page>(&self, page: &P) -> String {
        let headings = match page.query_selector_all(&self.title_selector).await {
            Ok(headings) => headings,
            Err(e) => {
                debug!(error = %e, "Title query failed");
                return String::new();
            }
        };
        let Some(heading) = headings.into_iter().next() else {
            return String::new();
        };
        match heading.text_content().await {
            Ok(text) => text.map(|t| t.trim().to_string()).unwrap_or_default(),
            Err(e) => {
                debug!(error = %e, "Title read failed");
                String::new()
            }
        }
    }
}

/// Inner text of the first element matching `selector`, if it has any.
async fn probe_text<P: Page>(page: &P, selector: &str) -> Option<String> {
    let elements = match page.query_selector_all(selector).await {
        Ok(elements) => elements,
        Err(e) => {
            debug!(%selector, error = %e, "Content tier query failed");
            return None;
        }
    };
    let first = elements.into_iter().next()?;
    match first.inner_text().await {
        Ok(text) if !text.trim().is_empty() => {
            debug!(%selector, preview = %truncate_for_log(&text, 120), "Content tier matched");
            Some(text)
        }
        Ok(_) => None,
        Err(e) => {
            debug!(%selector, error = %e, "Content tier read failed");
            None
        }
    }
}
