//! Self-contained HTML rendering of an [`ArticleRecord`].
//!
//! Everything interpolated into the document is escaped (`&`, `<`, `>`, `"`,
//! `'`), since titles and body text come straight from scraped pages.

use super::NO_CONTENT;
use crate::models::ArticleRecord;
use quick_xml::escape::escape;
use std::fmt::Write;

const STYLE: &str = "body{font-family:Georgia,serif;max-width:42rem;margin:2rem auto;padding:0 1rem;line-height:1.6}\
header p{color:#555;font-size:.9rem}";

/// Render `record` as a complete HTML document, one `<p>` per body line.
pub fn render_html(record: &ArticleRecord) -> String {
    let title = if record.title.is_empty() {
        "Untitled article"
    } else {
        record.title.as_str()
    };
    let title = escape(title);
    let url = escape(record.url.as_str());
    let iso = record.fetched_at.to_rfc3339();
    let human = record.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\">");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "<meta charset=\"utf-8\">");
    let _ = writeln!(
        html,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    );
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(html, "<header>");
    let _ = writeln!(html, "<h1>{title}</h1>");
    let _ = writeln!(html, "<p>Source: <a href=\"{url}\">{url}</a></p>");
    let _ = writeln!(
        html,
        "<p>Fetched: <time datetime=\"{}\">{}</time></p>",
        escape(iso.as_str()),
        escape(human.as_str())
    );
    let _ = writeln!(html, "</header>");
    let _ = writeln!(html, "<article>");

    let mut lines = record.lines().peekable();
    if lines.peek().is_none() {
        let _ = writeln!(html, "<p>{}</p>", escape(NO_CONTENT));
    }
    for line in lines {
        let _ = writeln!(html, "<p>{}</p>", escape(line));
    }

    let _ = writeln!(html, "</article>");
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}
