//! Page-rendering driver collaborator.
//!
//! The extractor never fetches or renders pages itself. It talks to a driver
//! through the read-only traits in this module:
//!
//! | Trait | Role |
//! |-------|------|
//! | [`Driver`] | Factory for isolated, single-use sessions |
//! | [`Session`] | Loads pages; must be closed when the run ends |
//! | [`Page`] | DOM queries and readiness waits on a loaded page |
//! | [`Element`] | Attribute and text reads on one matched element |
//!
//! [`http::HttpDriver`] is the default implementation: a plain HTTP fetch parsed
//! with `scraper`. A headless browser can be plugged in by implementing the
//! same traits.

use crate::errors::DriverError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod http;

#[cfg(test)]
pub mod mock;

/// Navigation milestone a page load waits for before returning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitUntil {
    Load,
    #[default]
    DomContentLoaded,
    NetworkIdle,
}

/// Options for [`Session::load_page`].
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

/// Creates driver sessions. One session per extraction run.
pub trait Driver {
    type Session: Session;

    async fn open_session(&self) -> Result<Self::Session, DriverError>;
}

/// An isolated browsing context.
///
/// [`close`](Session::close) only runs when the extraction run reaches its end.
/// A caller that drops the run future early skips it, so implementations must
/// also release their context and driver instance on `Drop`.
pub trait Session {
    type Page: Page;

    async fn load_page(&mut self, url: &str, options: LoadOptions)
    -> Result<Self::Page, DriverError>;

    /// Tear down the page, context and underlying driver instance.
    async fn close(self) -> Result<(), DriverError>;
}

/// A loaded document.
pub trait Page {
    type Element: Element;

    /// All elements matching `selector`, in document order.
    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, DriverError>;

    /// Resolve once at least one element matches `selector`.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
    -> Result<(), DriverError>;

    /// Resolve once an element matching `selector` is visible.
    async fn wait_for_visible(&self, selector: &str, timeout: Duration)
    -> Result<(), DriverError>;
}

/// A handle to one element of a [`Page`].
pub trait Element {
    async fn attribute(&self, name: &str) -> Result<Option<String>, DriverError>;

    /// Rendered text, with line breaks between block-level children.
    async fn inner_text(&self) -> Result<String, DriverError>;

    async fn text_content(&self) -> Result<Option<String>, DriverError>;
}
