//! Data models for feed entries and their normalized representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawEntry`]: An unprocessed entry as parsed from a feed endpoint
//! - [`FeedBatch`]: All entries retained from a single endpoint
//! - [`Card`]: The normalized, persisted update record
//!
//! Every field of [`RawEntry`] is optional: feed content is untrusted input
//! and the normalizer supplies fallbacks for anything missing.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A raw feed entry before normalization.
///
/// Carries the fields the pipeline cares about, each as given by the feed
/// (or absent). Timestamps come in two alternative forms: a structured
/// value parsed from the feed's machine-readable date fields, and the raw
/// display string exactly as published.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    /// The entry headline, untrimmed.
    pub title: Option<String>,
    /// The canonical URL of the entry.
    pub link: Option<String>,
    /// Structured publish timestamp, when the feed's date field parsed.
    pub published: Option<DateTime<FixedOffset>>,
    /// The publish date string exactly as it appeared in the feed.
    pub published_text: Option<String>,
    /// Short description or excerpt (preferred summary source).
    pub snippet: Option<String>,
    /// Full body text, used when no snippet is present.
    pub content: Option<String>,
}

/// The entries retained from one feed endpoint, in document order.
#[derive(Debug)]
pub struct FeedBatch {
    /// The endpoint the entries came from.
    pub url: String,
    /// At most the per-endpoint cap of entries.
    pub entries: Vec<RawEntry>,
}

/// One displayable update item, the only persisted entity.
///
/// The store file is a JSON array of these, newest `date` first. Two cards
/// with the same (category, title, link) are the same logical entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Card {
    /// Free-form label grouping the card ("News", "Career", ...).
    pub category: String,
    /// Display title, trimmed, never empty.
    pub title: String,
    /// Host name of the origin, leading "www." stripped.
    pub source: String,
    /// Calendar date in `YYYY-MM-DD` form; the sole sort and recency key.
    pub date: String,
    /// Whitespace-collapsed excerpt capped at 220 characters plus ellipsis.
    pub summary: String,
    /// Canonical item URL, or the placeholder `#`.
    pub link: String,
}

impl Card {
    /// The deduplication identity: (category, title, link).
    ///
    /// `date` and `summary` are deliberately excluded, so the first-seen
    /// version of an item is the one that persists.
    pub fn identity(&self) -> (String, String, String) {
        (
            self.category.clone(),
            self.title.clone(),
            self.link.clone(),
        )
    }
}
