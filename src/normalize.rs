//! Normalization of raw feed entries into [`Card`] records.
//!
//! [`to_card`] is a pure, total function: every field of the incoming entry
//! is optional and untrusted, and each has a documented fallback, so the
//! same inputs always produce the same card and nothing here can fail.
//!
//! Fallback chains ("first non-empty of A, B, C") are resolved through the
//! [`first_present`] combinator rather than nested conditionals.

use crate::models::{Card, RawEntry};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::trace;
use url::Url;

/// Character budget for card summaries, before the ellipsis.
pub const SUMMARY_CHARS: usize = 220;

/// Appended to every summary, even when nothing was truncated.
const ELLIPSIS: char = '…';

/// Title used when the entry has no usable headline.
const FALLBACK_TITLE: &str = "Update";

/// Link placeholder for entries without a URL.
const FALLBACK_LINK: &str = "#";

/// Stand-in origin host when the entry link is absent or unparseable.
const FALLBACK_HOST: &str = "example.com";

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Resolve an ordered list of optional sources to the first non-empty one.
pub fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates.iter().flatten().copied().find(|s| !s.is_empty())
}

/// Normalize one raw entry into a [`Card`] under the given category.
///
/// Field derivation:
/// - `date`: structured timestamp, else display timestamp, else `now`;
///   first 10 characters (the calendar-date portion).
/// - `title`: trimmed, else `"Update"`.
/// - `source`: host of the link with leading `"www."` removed, else
///   `"example.com"`.
/// - `summary`: snippet else content, HTML stripped, whitespace collapsed,
///   capped at [`SUMMARY_CHARS`] characters, ellipsis always appended.
/// - `link`: the entry link, else `"#"`.
pub fn to_card(category: &str, entry: &RawEntry, now: DateTime<Utc>) -> Card {
    let structured = entry.published.map(|ts| ts.to_rfc3339());
    let now_iso = now.to_rfc3339();
    let date_text = first_present(&[structured.as_deref(), entry.published_text.as_deref()])
        .unwrap_or(&now_iso);
    let date: String = date_text.chars().take(10).collect();

    let title = entry
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_TITLE)
        .to_string();

    let source = source_host(entry.link.as_deref());

    let body = first_present(&[entry.snippet.as_deref(), entry.content.as_deref()]).unwrap_or("");
    let summary = excerpt(body);

    let link = entry
        .link
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or(FALLBACK_LINK)
        .to_string();

    trace!(%category, %title, %date, "Normalized entry");

    Card {
        category: category.to_string(),
        title,
        source,
        date,
        summary,
        link,
    }
}

/// Produce the summary excerpt for a card.
///
/// Strips markup, collapses every whitespace run to a single space, keeps
/// the first [`SUMMARY_CHARS`] characters, and appends the ellipsis marker
/// unconditionally.
pub fn excerpt(text: &str) -> String {
    let collapsed = collapse_whitespace(&strip_html(text));
    let mut summary: String = collapsed.chars().take(SUMMARY_CHARS).collect();
    summary.push(ELLIPSIS);
    summary
}

/// Extract plain text from a possibly-HTML body.
fn strip_html(text: &str) -> String {
    if !text.contains('<') && !text.contains('&') {
        return text.to_string();
    }
    let fragment = Html::parse_fragment(text);
    fragment.root_element().text().collect::<Vec<_>>().join(" ")
}

fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").to_string()
}

/// Host name for the `source` field, leading `"www."` stripped.
fn source_host(link: Option<&str>) -> String {
    let host = link
        .filter(|l| !l.is_empty())
        .and_then(|l| Url::parse(l).ok())
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_HOST.to_string());
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}
