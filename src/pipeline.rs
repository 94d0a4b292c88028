//! The pure pipeline core.
//!
//! [`run`] maps (feed batches, previous cards, run time) to the new card
//! list: recency filter, normalization, curated injection, merge/dedupe,
//! stable descending sort, cap. No I/O happens here; `main` reads the store
//! before calling it and writes the store after.

use crate::curated;
use crate::feeds::parse;
use crate::models::{Card, FeedBatch, RawEntry};
use crate::normalize;
use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;
use tracing::{debug, info};

/// Maximum number of cards persisted; older cards fall off the end.
pub const MAX_CARDS: usize = 120;

/// Trailing recency window for fetched entries, in days.
pub const WINDOW_DAYS: i64 = 21;

/// Category assigned to every fetched entry.
pub const FEED_CATEGORY: &str = "News";

/// The timestamp an entry is judged by for recency.
///
/// Structured timestamp, else the parsed display timestamp, else the run
/// time (an undated entry counts as fresh).
pub fn effective_timestamp(entry: &RawEntry, now: DateTime<Utc>) -> DateTime<Utc> {
    entry
        .published
        .map(|ts| ts.with_timezone(&Utc))
        .or_else(|| {
            entry
                .published_text
                .as_deref()
                .and_then(parse::parse_datetime)
                .map(|ts| ts.with_timezone(&Utc))
        })
        .unwrap_or(now)
}

/// Produce the new card list from this run's batches and the prior store.
///
/// Entries older than the recency window are dropped before normalization.
/// Duplicate identities keep their first occurrence, with the current run's
/// cards (feed order, then curated) ahead of history, so a re-fetched item
/// beats its stored version. The result is newest-date-first, at most
/// [`MAX_CARDS`] long.
pub fn run(batches: &[FeedBatch], previous: Vec<Card>, now: DateTime<Utc>) -> Vec<Card> {
    let cutoff = now - Duration::days(WINDOW_DAYS);

    let mut fresh: Vec<Card> = Vec::new();
    let mut stale = 0usize;
    for batch in batches {
        for entry in &batch.entries {
            if effective_timestamp(entry, now) >= cutoff {
                fresh.push(normalize::to_card(FEED_CATEGORY, entry, now));
            } else {
                stale += 1;
            }
        }
    }
    debug!(fresh = fresh.len(), stale, %cutoff, "Applied recency window");

    fresh.extend(curated::standing_cards(now));

    let previous_len = previous.len();
    let mut merged: Vec<Card> = fresh
        .into_iter()
        .chain(previous)
        .unique_by(Card::identity)
        .collect();

    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged.truncate(MAX_CARDS);

    info!(
        kept = merged.len(),
        history = previous_len,
        "Merged, deduplicated, and capped cards"
    );
    merged
}
