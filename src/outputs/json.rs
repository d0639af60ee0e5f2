//! Artifact writing: HTML render plus the JSON record.
//!
//! # Output Structure
//!
//! Given `--out ./site/news/latest.html`:
//! ```text
//! site/news/
//! ├── latest.html   # HTML render
//! └── latest.json   # ArticleRecord
//! ```
//!
//! Parent directories are created as needed. Nothing is written unless a
//! record exists.

use super::html::render_html;
use crate::models::ArticleRecord;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

pub const RECORD_FILENAME: &str = "latest.json";

/// Path of the JSON record written next to `html_path`.
pub fn record_path(html_path: &Path) -> PathBuf {
    match html_path.parent() {
        Some(dir) => dir.join(RECORD_FILENAME),
        None => PathBuf::from(RECORD_FILENAME),
    }
}

/// Write the HTML render to `html_path` and the record beside it.
///
/// # Returns
///
/// The path of the JSON record, or an error if directory creation,
/// serialization or either write fails.
#[instrument(level = "info", skip_all, fields(path = %html_path.display()))]
pub async fn write_artifacts(
    record: &ArticleRecord,
    html_path: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(record)?;
    let json_path = record_path(html_path);

    if let Some(dir) = html_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        info!(dir = %dir.display(), "Ensuring output directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(html_path, render_html(record)).await?;
    info!(path = %html_path.display(), "Wrote HTML render");

    fs::write(&json_path, json).await?;
    info!(path = %json_path.display(), "Wrote JSON record");

    Ok(json_path)
}
