//! Plain-text summary of an [`ArticleRecord`] for terminal output.

use super::NO_CONTENT;
use crate::models::ArticleRecord;

const SEPARATOR: &str = "----------------------------------------";

/// ```text
/// TITLE: <title>      (omitted when the title is empty)
/// URL: <url>
/// ----------------------------------------
/// <body, or the no-content placeholder>
/// ```
pub fn render_text(record: &ArticleRecord) -> String {
    let mut out = String::new();
    if !record.title.is_empty() {
        out.push_str("TITLE: ");
        out.push_str(&record.title);
        out.push('\n');
    }
    out.push_str("URL: ");
    out.push_str(&record.url);
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
    if record.text.is_empty() {
        out.push_str(NO_CONTENT);
    } else {
        out.push_str(&record.text);
    }
    out.push('\n');
    out
}
