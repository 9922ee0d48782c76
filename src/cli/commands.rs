//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HummingKit Apple Music CLI
#[derive(Parser, Debug)]
#[command(name = "hummingkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Developer token (overrides config and environment)
    #[arg(long, global = true)]
    pub developer_token: Option<String>,

    /// Music user token (overrides config and environment)
    #[arg(long, global = true)]
    pub user_token: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the signed-in user's storefront
    Storefront,

    /// Show storefronts by id (all storefronts when none are given)
    Storefronts {
        /// Storefront ids (e.g. us jp)
        ids: Vec<String>,
    },

    /// Search the catalog for songs and albums
    Search {
        /// Storefront to search in
        #[arg(short, long, default_value = "us")]
        storefront: String,

        /// Search term (multiple words are joined with spaces)
        #[arg(required = true)]
        term: Vec<String>,
    },

    /// Show a catalog song
    Song {
        /// Storefront the song belongs to
        #[arg(short, long, default_value = "us")]
        storefront: String,

        /// Catalog song id
        id: String,
    },

    /// Show recently played resources
    Recent,

    /// Fetch every song in the user's library
    Songs,

    /// Fetch every playlist in the user's library
    Playlists,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["hummingkit", "search", "--storefront", "jp", "daft", "punk"]);
        match cli.command {
            Commands::Search { storefront, term } => {
                assert_eq!(storefront, "jp");
                assert_eq!(term, vec!["daft", "punk"]);
            }
            other => panic!("Expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "hummingkit",
            "songs",
            "--developer-token",
            "dev",
            "--user-token",
            "user",
            "--pretty",
            "-v",
        ]);
        assert!(matches!(cli.command, Commands::Songs));
        assert_eq!(cli.developer_token.as_deref(), Some("dev"));
        assert_eq!(cli.user_token.as_deref(), Some("user"));
        assert!(cli.pretty);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_storefronts_without_ids() {
        let cli = Cli::parse_from(["hummingkit", "storefronts"]);
        assert!(matches!(cli.command, Commands::Storefronts { ids } if ids.is_empty()));
    }

    #[test]
    fn test_search_requires_term() {
        assert!(Cli::try_parse_from(["hummingkit", "search"]).is_err());
    }
}
