//! Utility functions for text cleanup, bounded waits and logging.
//!
//! This module provides helpers used throughout the application:
//! - Text normalization of raw `innerText` into stable, line-oriented text
//! - A bounded race over several readiness waits
//! - String truncation for log previews

use futures::future::select_all;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalize raw extracted text.
///
/// Each line has its runs of whitespace collapsed to a single space and is
/// trimmed; lines that end up empty are dropped. Survivors are joined with
/// `\n` in their original order. `\r\n` and lone `\r` count as line breaks.
///
/// The function is total and idempotent.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_text("a   b\n\n c \n"), "a b\nc");
/// ```
pub fn normalize_text(raw: &str) -> String {
    raw.split(['\n', '\r'])
        .map(|line| WHITESPACE_RUN.replace_all(line, " "))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .join("\n")
}

/// How a [`race_until`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceOutcome {
    /// The wait at `index` settled first; `ok` is false when it settled with an error.
    Settled { index: usize, ok: bool },
    /// Nothing settled within the bound.
    TimedOut,
    /// There was nothing to wait for.
    Empty,
}

/// Wait until any of `waits` settles or `bound` elapses, whichever comes first.
///
/// Errors from the waits are swallowed; the outcome only tells the caller
/// which branch, if any, finished first. Unfinished waits are dropped.
pub async fn race_until<F, T, E>(waits: Vec<F>, bound: Duration) -> RaceOutcome
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    if waits.is_empty() {
        return RaceOutcome::Empty;
    }
    let pinned = waits.into_iter().map(Box::pin).collect::<Vec<_>>();
    match tokio::time::timeout(bound, select_all(pinned)).await {
        Ok((Ok(_), index, _)) => RaceOutcome::Settled { index, ok: true },
        Ok((Err(e), index, _)) => {
            debug!(index, error = %e, "Readiness wait settled with an error");
            RaceOutcome::Settled { index, ok: false }
        }
        Err(_) => RaceOutcome::TimedOut,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) and
/// get `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
