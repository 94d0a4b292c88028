//! Standing hand-authored cards appended to every run.
//!
//! These are not derived from any feed. They carry the run date, so a fresh
//! run keeps them at the top of the store, and they go through the same
//! merge and dedupe pass as fetched cards.

use crate::models::Card;
use chrono::{DateTime, Utc};

/// The curated cards for this run, stamped with the run date.
///
/// Summaries are stored as authored; they do not get the normalizer's
/// truncation or ellipsis treatment.
pub fn standing_cards(now: DateTime<Utc>) -> Vec<Card> {
    let date = now.format("%Y-%m-%d").to_string();
    vec![
        Card {
            category: "Career".to_string(),
            title: "Hiring trend: analytics + LLM orchestration".to_string(),
            source: "curated".to_string(),
            date: date.clone(),
            summary: "Rising demand for analysts who can wire LLMs to dashboards with governance and latency targets.".to_string(),
            link: "#".to_string(),
        },
        Card {
            category: "Certifications".to_string(),
            title: "DP-100 focus areas to study next".to_string(),
            source: "curated".to_string(),
            date,
            summary: "MLOps, responsible AI, prompt/flow orchestration, and experiment tracking remain high-value.".to_string(),
            link: "#".to_string(),
        },
    ]
}
