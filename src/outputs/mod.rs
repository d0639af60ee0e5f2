//! Output generation for an extracted article.
//!
//! # Submodules
//!
//! - [`html`]: Self-contained HTML document, one paragraph per body line
//! - [`text`]: Plain-text summary printed to stdout
//! - [`json`]: Writes the HTML render and the `latest.json` record to disk
//!
//! Renderers are pure functions of an [`ArticleRecord`](crate::models::ArticleRecord).

pub mod html;
pub mod json;
pub mod text;

/// Shown in place of the body when no text was extracted.
pub const NO_CONTENT: &str = "no content extracted";
