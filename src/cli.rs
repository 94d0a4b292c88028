//! Command-line interface definitions for Feed Updates.
//!
//! This module defines the CLI arguments using the `clap` crate. The binary
//! runs with no flags in the common case; the store path can be overridden
//! for testing or alternate deployments.

use clap::Parser;

/// Command-line arguments for the Feed Updates application.
///
/// # Examples
///
/// ```sh
/// # Default: read and overwrite ./updates.json
/// feed_updates
///
/// # Write the store somewhere else
/// feed_updates --store-path /srv/site/updates.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the JSON store read at startup and overwritten at the end
    #[arg(short, long, default_value = "updates.json")]
    pub store_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_store_path() {
        let cli = Cli::parse_from(&["feed_updates"]);
        assert_eq!(cli.store_path, "updates.json");
    }

    #[test]
    fn test_cli_store_path_override() {
        let cli = Cli::parse_from(&["feed_updates", "--store-path", "/tmp/updates.json"]);
        assert_eq!(cli.store_path, "/tmp/updates.json");
    }

    #[test]
    fn test_cli_short_flag() {
        let cli = Cli::parse_from(&["feed_updates", "-s", "out.json"]);
        assert_eq!(cli.store_path, "out.json");
    }
}
