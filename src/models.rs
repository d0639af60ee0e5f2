//! Data models for the extracted article.
//!
//! [`ArticleRecord`] is the only value that leaves the extractor. It is built
//! exactly once per successful run and never mutated afterwards; renderers and
//! the JSON writer only borrow it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The latest article from a news homepage, normalized.
///
/// Serialized as a flat object with the fields `title`, `url`, `text` and
/// `fetchedAt` (ISO-8601, UTC).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    /// Headline, trimmed. Empty when the page had no headline.
    pub title: String,
    /// Absolute URL of the article page.
    pub url: String,
    /// Body text, one whitespace-collapsed line per source line.
    pub text: String,
    /// When extraction completed.
    pub fetched_at: DateTime<Utc>,
}

impl ArticleRecord {
    /// Build a record stamped with the current time.
    pub fn stamped(title: String, url: String, text: String) -> Self {
        Self {
            title: title.trim().to_string(),
            url,
            text,
            fetched_at: Utc::now(),
        }
    }

    /// Body lines in source order; empty when nothing was extracted.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().filter(|l| !l.is_empty())
    }
}
