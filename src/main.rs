//! # Feed Updates
//!
//! A one-shot aggregation pipeline that fetches a fixed set of syndication
//! feeds, normalizes entries into a common card schema, and maintains a
//! capped `updates.json` list for a static site.
//!
//! ## Features
//!
//! - Fetches RSS 2.0 and Atom endpoints with per-endpoint failure isolation
//! - Normalizes untrusted entries (fallback titles, links, dates, summaries)
//! - Keeps only entries from the trailing 21-day window
//! - Injects a small set of curated Career/Certifications cards each run
//! - Merges with the previous store, dedupes by (category, title, link),
//!   and persists the newest 120 cards
//!
//! ## Usage
//!
//! ```sh
//! feed_updates                # reads and overwrites ./updates.json
//! feed_updates -s out.json    # alternate store path
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Download and parse each feed endpoint
//! 2. **History**: Load the previously persisted store (tolerant)
//! 3. **Pipeline**: Pure merge of fresh, curated, and historical cards
//! 4. **Output**: Overwrite the JSON store (the only fatal step)

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod curated;
mod feeds;
mod models;
mod normalize;
mod pipeline;
mod store;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feed_updates starting up");

    let args = Cli::parse();
    debug!(?args.store_path, "Parsed CLI arguments");

    let now = Utc::now();
    let client = feeds::http_client()?;

    // ---- Fetch feeds ----
    let batches = feeds::fetch_all(&client).await;
    info!(sources = batches.len(), "Feed fetching completed");

    // ---- Load history ----
    let previous = store::load_previous(&args.store_path).await;

    // ---- Merge, dedupe, sort, cap ----
    let cards = pipeline::run(&batches, previous, now);
    info!(count = cards.len(), "Pipeline produced final card list");

    // ---- Persist (fatal on failure) ----
    if let Err(e) = store::write_updates(&cards, &args.store_path).await {
        error!(path = %args.store_path, error = %e, "Failed to write updates store");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        cards = cards.len(),
        "Execution complete"
    );

    Ok(())
}
