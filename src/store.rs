//! Reading and writing the persisted card store.
//!
//! The store is a single pretty-printed JSON array of [`Card`] objects.
//! Loading is tolerant: a missing or unreadable store is an empty history,
//! never an error. Writing is the one fatal operation in the pipeline; a
//! failure here must surface to the caller.

use crate::models::Card;
use std::error::Error;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Load the previously persisted cards.
///
/// A missing file or a body that does not parse as a card array both yield
/// an empty history ("no prior state").
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn load_previous(path: &str) -> Vec<Card> {
    let body = match fs::read_to_string(path).await {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "No prior store; starting with empty history");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Card>>(&body) {
        Ok(cards) => {
            info!(count = cards.len(), "Loaded prior store");
            cards
        }
        Err(e) => {
            debug!(error = %e, "Prior store unreadable; starting with empty history");
            Vec::new()
        }
    }
}

/// Overwrite the store with the final card list.
///
/// # Errors
///
/// Serialization or filesystem failures propagate; the run must not end
/// quietly with the store unwritten.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_updates(cards: &[Card], path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(cards)?;
    fs::write(path, json).await?;
    info!(count = cards.len(), "Wrote updates store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_store(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("feed_updates_{}_{}.json", name, std::process::id()))
    }

    fn sample_cards() -> Vec<Card> {
        vec![Card {
            category: "News".to_string(),
            title: "A".to_string(),
            source: "example.com".to_string(),
            date: "2025-08-01".to_string(),
            summary: "Something happened…".to_string(),
            link: "https://example.com/a".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_load_missing_store_is_empty() {
        let path = temp_store("missing");
        let _ = fs::remove_file(&path).await;
        assert!(load_previous(path.to_str().unwrap()).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_store_is_empty() {
        let path = temp_store("malformed");
        fs::write(&path, "{ not json ]").await.unwrap();
        assert!(load_previous(path.to_str().unwrap()).await.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_load_wrong_shape_is_empty() {
        let path = temp_store("wrong_shape");
        fs::write(&path, r#"{"cards": []}"#).await.unwrap();
        assert!(load_previous(path.to_str().unwrap()).await.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_write_then_load_round_trips() {
        let path = temp_store("round_trip");
        let cards = sample_cards();

        write_updates(&cards, path.to_str().unwrap()).await.unwrap();
        let loaded = load_previous(path.to_str().unwrap()).await;
        assert_eq!(loaded, cards);

        let body = fs::read_to_string(&path).await.unwrap();
        // Pretty-printed, one field per line.
        assert!(body.contains("\n  "));
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_write_to_missing_directory_fails() {
        let path = temp_store("no_such_dir").join("nested").join("updates.json");
        assert!(
            write_updates(&sample_cards(), path.to_str().unwrap())
                .await
                .is_err()
        );
    }
}
