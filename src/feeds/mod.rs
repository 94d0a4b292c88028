//! Feed endpoints and fetching.
//!
//! This module owns the static list of syndication endpoints and the fetch
//! walk over them. Endpoints are independent: a failed fetch or parse is
//! logged and skipped without affecting the rest of the run.
//!
//! # Sources
//!
//! | Source | Format | Notes |
//! |--------|--------|-------|
//! | Towards Data Science | RSS | data/ML articles |
//! | AWS Machine Learning blog | RSS | |
//! | Azure AI + ML blog | RSS | |
//! | Power BI blog | RSS | |
//! | scikit-learn blog | Atom | |
//! | Microsoft Learn | RSS | broad certification/learning feed |
//!
//! # Common Pattern
//!
//! Each endpoint goes through the same two steps:
//! 1. **Fetch**: one HTTP GET per endpoint through a shared client
//! 2. **Parse**: RSS/Atom deserialization into [`RawEntry`] values,
//!    keeping at most [`PER_FEED_CAP`] entries per endpoint

pub mod parse;

use crate::models::{FeedBatch, RawEntry};
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// The feed endpoints, walked in this order every run.
pub const FEEDS: &[&str] = &[
    // Industry / tools
    "https://towardsdatascience.com/feed",
    "https://aws.amazon.com/blogs/machine-learning/feed/",
    "https://azurecomcdn.azureedge.net/en-us/blog/topics/ai-machine-learning/feed/",
    "https://powerbi.microsoft.com/en-us/blog/feed/",
    "https://blog.scikit-learn.org/feed.xml",
    // Certifications / learn
    "https://learn.microsoft.com/api/learnrss",
];

/// Only the first entries of each endpoint are considered, so no single
/// source can dominate a run.
pub const PER_FEED_CAP: usize = 8;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by all endpoint fetches.
pub fn http_client() -> Result<reqwest::Client, Box<dyn Error>> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;
    Ok(client)
}

/// Fetch every endpoint in [`FEEDS`], in order.
///
/// Failed endpoints are logged and skipped; the returned batches keep the
/// feed-list order of the endpoints that succeeded.
#[instrument(level = "info", skip_all)]
pub async fn fetch_all(client: &reqwest::Client) -> Vec<FeedBatch> {
    let batches: Vec<FeedBatch> = stream::iter(FEEDS.iter().copied())
        .then(|url| async move {
            match fetch_feed(client, url).await {
                Ok(entries) => {
                    info!(%url, count = entries.len(), "Fetched feed");
                    Some(FeedBatch {
                        url: url.to_string(),
                        entries,
                    })
                }
                Err(e) => {
                    error!(%url, error = %e, "Feed error; skipping source");
                    None
                }
            }
        })
        .filter(|opt| std::future::ready(opt.is_some()))
        .map(|opt| opt.unwrap())
        .collect()
        .await;

    let total: usize = batches.iter().map(|b| b.entries.len()).sum();
    info!(
        sources = batches.len(),
        of = FEEDS.len(),
        entries = total,
        "Fetched all feeds"
    );
    batches
}

/// Fetch and parse a single endpoint.
#[instrument(level = "info", skip_all, fields(%url))]
async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<RawEntry>, Box<dyn Error>> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(bytes = body.len(), "Fetched feed body");
    entries_from_body(&body)
}

/// Parse a feed body and apply the per-endpoint cap.
pub fn entries_from_body(body: &str) -> Result<Vec<RawEntry>, Box<dyn Error>> {
    let mut entries = parse::entries(body)?;
    entries.truncate(PER_FEED_CAP);
    Ok(entries)
}
