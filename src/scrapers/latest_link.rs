//! Locate the latest article on a news homepage.
//!
//! # Ordering precondition
//!
//! The homepage is assumed to list its feed newest-first. The first element
//! in document order that matches the teaser selector is therefore taken to
//! be the most recent article. Nothing in the DOM lets the resolver verify
//! this; a site that orders its feed differently needs a different selector.
//!
//! The link target is read from the `href` attribute instead of clicking the
//! element, so client-side navigation on the host page plays no part.

use crate::driver::{Element, Page};
use crate::errors::{DriverError, ExtractError};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

#[derive(Debug, Clone)]
pub struct LatestLinkResolver {
    base: Url,
    selector: String,
    wait: Duration,
}

impl LatestLinkResolver {
    /// * `base` - origin that relative links are resolved against
    /// * `selector` - matches article teaser links
    /// * `wait` - how long to wait for the first teaser to appear
    pub fn new(base: Url, selector: impl Into<String>, wait: Duration) -> Self {
        Self {
            base,
            selector: selector.into(),
            wait,
        }
    }

    /// Absolute URL of the latest article on `page`.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::NotFound`] when no teaser matches, or the first one
    ///   has a missing or empty `href`
    /// - [`ExtractError::Timeout`] when the driver does not answer the wait
    ///   within the bound
    /// - [`ExtractError::Driver`] when a query or attribute read fails
    #[instrument(level = "info", skip_all, fields(selector = %self.selector))]
    pub async fn resolve<P: Page>(&self, page: &P) -> Result<String, ExtractError> {
        match tokio::time::timeout(self.wait, page.wait_for_selector(&self.selector, self.wait))
            .await
        {
            Ok(Ok(())) => {}
            // The driver answered: nothing matched in time. The query below
            // turns that into NotFound.
            Ok(Err(DriverError::Timeout(after))) => {
                debug!(?after, "No teaser link appeared while waiting");
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                return Err(ExtractError::Timeout {
                    what: format!("teaser link `{}`", self.selector),
                    after: self.wait,
                });
            }
        }

        let teasers = page.query_selector_all(&self.selector).await?;
        debug!(count = teasers.len(), "Matched teaser links");
        let latest = teasers.into_iter().next().ok_or_else(|| self.not_found())?;

        let href = latest
            .attribute("href")
            .await?
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .ok_or_else(|| self.not_found())?;

        let url = self.absolutize(&href)?;
        info!(%href, %url, "Resolved latest article link");
        Ok(url)
    }

    /// Resolve `href` against the base origin unless it is already absolute.
    pub fn absolutize(&self, href: &str) -> Result<String, ExtractError> {
        if Url::parse(href).is_ok() {
            return Ok(href.to_string());
        }
        self.base
            .join(href)
            .map(String::from)
            .map_err(|source| ExtractError::InvalidLink {
                href: href.to_string(),
                base: self.base.to_string(),
                source,
            })
    }

    fn not_found(&self) -> ExtractError {
        ExtractError::NotFound {
            selector: self.selector.clone(),
        }
    }
}
