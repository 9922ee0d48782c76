//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::client::MusicClient;
use crate::config::ClientConfig;
use crate::decode::FetchOutcome;
use crate::error::{Result, ResultExt};
use crate::pagination::PaginationError;
use crate::types::{OptionStringExt, ResourceKind};
use serde_json::Value;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client =
            MusicClient::new(&self.load_config()?).context("Failed to create client")?;

        match &self.cli.command {
            Commands::Storefront => self.emit(client.user_storefront().await),
            Commands::Storefronts { ids } if ids.is_empty() => {
                self.emit(client.all_storefronts().await)
            }
            Commands::Storefronts { ids } => self.emit(client.storefronts(ids.as_slice()).await),
            Commands::Search { storefront, term } => {
                self.emit(client.search(storefront, &term.join(" ")).await)
            }
            Commands::Song { storefront, id } => self.emit(
                client
                    .catalog_resource(storefront, ResourceKind::Songs, id)
                    .await,
            ),
            Commands::Recent => self.emit(client.recently_played().await),
            Commands::Songs => self.emit_all(client.fetch_all_library_songs().await),
            Commands::Playlists => self.emit_all(client.fetch_all_library_playlists().await),
        }
    }

    /// Config file, then environment, then command-line tokens
    fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => {
                info!("Loading config from {}", path.display());
                ClientConfig::load(path)?
            }
            None => ClientConfig::default(),
        };
        let mut config = config.apply_env();

        if let Some(token) = self.cli.developer_token.clone().none_if_empty() {
            config.developer_token = Some(token);
        }
        if let Some(token) = self.cli.user_token.clone().none_if_empty() {
            config.user_token = Some(token);
        }

        Ok(config)
    }

    fn emit(&self, outcome: FetchOutcome) -> Result<()> {
        let value = outcome.into_result()?;
        self.output(&value)
    }

    fn emit_all(&self, result: std::result::Result<Value, PaginationError>) -> Result<()> {
        match result {
            Ok(value) => self.output(&value),
            Err(e) => {
                warn!(
                    "Pagination stopped after {} page(s), discarding partial result",
                    e.pages
                );
                Err(e.into())
            }
        }
    }

    fn output(&self, value: &Value) -> Result<()> {
        let text = if self.cli.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{text}");
        Ok(())
    }
}
