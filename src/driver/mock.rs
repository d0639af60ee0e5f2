//! Scripted driver collaborators for tests.
//!
//! [`MockDriver`] serves pre-built pages keyed by URL and records every
//! session open, page load and close in a shared [`CallLog`]. Pages are either
//! real [`HtmlPage`](super::http::HtmlPage) fixtures or [`ScriptedPage`]s whose
//! elements can misbehave on demand.

use super::{Driver, Element, LoadOptions, Page, Session};
use crate::errors::DriverError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct CallLog {
    pub opened: usize,
    pub closed: usize,
    pub dropped: usize,
    pub loaded: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MockDriver<P> {
    pages: HashMap<String, P>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
    log: Arc<Mutex<CallLog>>,
}

impl<P> Default for MockDriver<P> {
    fn default() -> Self {
        Self {
            pages: HashMap::new(),
            failing: HashSet::new(),
            hanging: HashSet::new(),
            log: Arc::new(Mutex::new(CallLog::default())),
        }
    }
}

impl<P: Page + Clone> MockDriver<P> {
    pub fn with_page(mut self, url: &str, page: P) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Loading `url` fails with a navigation error.
    pub fn failing_at(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Loading `url` never completes.
    pub fn hanging_at(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    pub fn log(&self) -> Arc<Mutex<CallLog>> {
        Arc::clone(&self.log)
    }
}

impl<P: Page + Clone> Driver for MockDriver<P> {
    type Session = MockSession<P>;

    async fn open_session(&self) -> Result<MockSession<P>, DriverError> {
        self.log.lock().unwrap().opened += 1;
        Ok(MockSession {
            driver: self.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MockSession<P> {
    driver: MockDriver<P>,
}

impl<P> Drop for MockSession<P> {
    fn drop(&mut self) {
        if let Ok(mut log) = self.driver.log.lock() {
            log.dropped += 1;
        }
    }
}

impl<P: Page + Clone> Session for MockSession<P> {
    type Page = P;

    async fn load_page(&mut self, url: &str, _options: LoadOptions) -> Result<P, DriverError> {
        self.driver.log.lock().unwrap().loaded.push(url.to_string());
        if self.driver.hanging.contains(url) {
            std::future::pending::<()>().await;
        }
        if self.driver.failing.contains(url) {
            return Err(DriverError::Navigation {
                url: url.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.driver
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| DriverError::Navigation {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            })
    }

    async fn close(self) -> Result<(), DriverError> {
        self.driver.log.lock().unwrap().closed += 1;
        Ok(())
    }
}

/// An element whose reads are scripted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedElement {
    attributes: HashMap<String, String>,
    inner_text: Option<String>,
    text_content: Option<String>,
    detached: bool,
}

impl ScriptedElement {
    pub fn text(text: &str) -> Self {
        Self {
            inner_text: Some(text.to_string()),
            text_content: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn link(href: &str) -> Self {
        let mut element = Self::text("teaser");
        element.attributes.insert("href".to_string(), href.to_string());
        element
    }

    /// Every read fails as if the node left the DOM mid-read.
    pub fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }
}

impl Element for ScriptedElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>, DriverError> {
        if self.detached {
            return Err(DriverError::Detached);
        }
        Ok(self.attributes.get(name).cloned())
    }

    async fn inner_text(&self) -> Result<String, DriverError> {
        if self.detached {
            return Err(DriverError::Detached);
        }
        Ok(self.inner_text.clone().unwrap_or_default())
    }

    async fn text_content(&self) -> Result<Option<String>, DriverError> {
        if self.detached {
            return Err(DriverError::Detached);
        }
        Ok(self.text_content.clone())
    }
}

/// A page whose query results are scripted per selector.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPage {
    elements: HashMap<String, Vec<ScriptedElement>>,
    failing_queries: HashSet<String>,
    hang_waits: bool,
}

impl ScriptedPage {
    pub fn with(mut self, selector: &str, element: ScriptedElement) -> Self {
        self.elements
            .entry(selector.to_string())
            .or_default()
            .push(element);
        self
    }

    /// Querying `selector` fails with a driver error.
    pub fn failing_query(mut self, selector: &str) -> Self {
        self.failing_queries.insert(selector.to_string());
        self
    }

    /// Waits never settle, simulating an unresponsive driver.
    pub fn hanging_waits(mut self) -> Self {
        self.hang_waits = true;
        self
    }

    async fn wait(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        if self.hang_waits {
            std::future::pending::<()>().await;
        }
        match self.elements.get(selector) {
            Some(found) if !found.is_empty() => Ok(()),
            _ => Err(DriverError::Timeout(timeout)),
        }
    }
}

impl Page for ScriptedPage {
    type Element = ScriptedElement;

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<ScriptedElement>, DriverError> {
        if self.failing_queries.contains(selector) {
            return Err(DriverError::Detached);
        }
        Ok(self.elements.get(selector).cloned().unwrap_or_default())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        self.wait(selector, timeout).await
    }

    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        self.wait(selector, timeout).await
    }
}
