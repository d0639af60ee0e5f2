//! HTTP driver backed by `reqwest` and `scraper`.
//!
//! Pages are fetched once and parsed into a static DOM. There is no script
//! execution, so the document never changes after load:
//! - readiness waits resolve immediately when a match exists and fail with
//!   [`DriverError::Timeout`] right away when none does
//! - every matched element counts as visible
//! - [`WaitUntil`] is accepted for interface parity and only logged
//!
//! `innerText` is approximated by emitting a line break at block-level element
//! boundaries and skipping elements that never render text.

use super::{Driver, Element, LoadOptions, Page, Session};
use crate::errors::DriverError;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument};

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "tr", "ul",
];

const SILENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Driver that fetches pages over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpDriver {
    user_agent: String,
}

impl HttpDriver {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }
}

impl Driver for HttpDriver {
    type Session = HttpSession;

    async fn open_session(&self) -> Result<HttpSession, DriverError> {
        // Fresh client per session so connections stay scoped to one run.
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()?;
        debug!(user_agent = %self.user_agent, "Opened HTTP session");
        Ok(HttpSession {
            client: Some(client),
        })
    }
}

/// One HTTP browsing context.
#[derive(Debug)]
pub struct HttpSession {
    client: Option<reqwest::Client>,
}

impl Session for HttpSession {
    type Page = HtmlPage;

    #[instrument(level = "info", skip(self, options), fields(wait_until = ?options.wait_until))]
    async fn load_page(&mut self, url: &str, options: LoadOptions) -> Result<HtmlPage, DriverError> {
        let client = self.client.as_ref().ok_or(DriverError::Closed)?;
        let response = client
            .get(url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| navigation_error(url, options.timeout, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DriverError::Navigation {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| navigation_error(url, options.timeout, e))?;
        info!(bytes = body.len(), "Loaded page");
        Ok(HtmlPage::parse(url, &body))
    }

    async fn close(mut self) -> Result<(), DriverError> {
        self.client.take().ok_or(DriverError::Closed)?;
        debug!("Closed HTTP session");
        Ok(())
    }
}

fn navigation_error(url: &str, timeout: Duration, e: reqwest::Error) -> DriverError {
    if e.is_timeout() {
        DriverError::Timeout(timeout)
    } else {
        DriverError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

/// A parsed, static HTML document.
#[derive(Clone)]
pub struct HtmlPage {
    url: String,
    document: Html,
}

impl std::fmt::Debug for HtmlPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlPage").field("url", &self.url).finish()
    }
}

impl HtmlPage {
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }

    fn selector(selector: &str) -> Result<Selector, DriverError> {
        Selector::parse(selector).map_err(|e| DriverError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }

    fn has_match(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        let selector = Self::selector(selector)?;
        match self.document.select(&selector).next() {
            Some(_) => Ok(()),
            None => Err(DriverError::Timeout(timeout)),
        }
    }
}

impl Page for HtmlPage {
    type Element = HtmlElement;

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<HtmlElement>, DriverError> {
        let selector = Self::selector(selector)?;
        Ok(self.document.select(&selector).map(HtmlElement::snapshot).collect())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        self.has_match(selector, timeout)
    }

    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        self.has_match(selector, timeout)
    }
}

/// Snapshot of an element taken at query time.
#[derive(Debug, Clone, Default)]
pub struct HtmlElement {
    attributes: HashMap<String, String>,
    inner_text: String,
    text_content: String,
}

impl HtmlElement {
    fn snapshot(element: ElementRef<'_>) -> Self {
        let attributes = element
            .value()
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut inner_text = String::new();
        render_inner_text(element, &mut inner_text);
        Self {
            attributes,
            inner_text,
            text_content: element.text().collect(),
        }
    }
}

impl Element for HtmlElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>, DriverError> {
        Ok(self.attributes.get(name).cloned())
    }

    async fn inner_text(&self) -> Result<String, DriverError> {
        Ok(self.inner_text.clone())
    }

    async fn text_content(&self) -> Result<Option<String>, DriverError> {
        Ok(Some(self.text_content.clone()))
    }
}

fn render_inner_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if SILENT_ELEMENTS.contains(&name) {
        return;
    }
    let block = BLOCK_ELEMENTS.contains(&name);
    if block && !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    render_inner_text(child, out);
                }
            }
            _ => {}
        }
    }
    if block && !out.ends_with('\n') {
        out.push('\n');
    }
}
