//! Apple Music client
//!
//! [`MusicClient`] ties the request factory, a [`Transport`] and the response
//! decoder together.
//!
//! # Overview
//!
//! - single-shot endpoints return a decoded [`FetchOutcome`]
//! - library listings return a [`Paginator`], or the merged result of a full
//!   run through the `fetch_all_*` methods
//!
//! The transport is shared behind an `Arc`, so paginating songs and
//! playlists at the same time needs nothing more than two paginators.

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::decode::{decode_response, FetchOutcome};
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::pagination::{PaginationError, Paginator, PaginatorConfig};
use crate::request::{LibraryAdditions, RequestDescriptor, RequestFactory};
use crate::types::ResourceKind;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Client for the Apple Music API
#[derive(Clone)]
pub struct MusicClient {
    factory: RequestFactory,
    transport: Arc<dyn Transport>,
    pagination: PaginatorConfig,
}

impl MusicClient {
    /// Create a client over HTTP from a config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let credentials = config.credentials()?;
        let transport = HttpClient::with_config(config.http_config())?;
        let factory = RequestFactory::with_base_url(&config.base_url, credentials);

        debug!("Client for {} ({:?})", factory.base_url(), factory.credentials());
        Ok(Self::with_transport(
            factory,
            Arc::new(transport),
            config.pagination.clone(),
        ))
    }

    /// Create a client over HTTP with default settings
    pub fn with_credentials(credentials: Credentials) -> Result<Self> {
        let transport = HttpClient::new()?;
        Ok(Self::with_transport(
            RequestFactory::new(credentials),
            Arc::new(transport),
            PaginatorConfig::default(),
        ))
    }

    /// Create a client over any transport
    pub fn with_transport(
        factory: RequestFactory,
        transport: Arc<dyn Transport>,
        pagination: PaginatorConfig,
    ) -> Self {
        Self {
            factory,
            transport,
            pagination,
        }
    }

    /// Request factory used by this client
    pub fn factory(&self) -> &RequestFactory {
        &self.factory
    }

    /// Pagination settings
    pub fn pagination_config(&self) -> &PaginatorConfig {
        &self.pagination
    }

    /// Execute a request and decode the response
    pub async fn send(&self, request: &RequestDescriptor) -> FetchOutcome {
        debug!("{} {}", request.method, request.url);
        decode_response(self.transport.execute(request).await)
    }

    // ========================================================================
    // Storefronts
    // ========================================================================

    /// Storefront of the signed-in user's account
    pub async fn user_storefront(&self) -> FetchOutcome {
        self.send(&self.factory.user_storefront()).await
    }

    /// A single storefront
    pub async fn storefront(&self, storefront_id: &str) -> FetchOutcome {
        self.send(&self.factory.storefront(storefront_id)).await
    }

    /// Several storefronts by id
    pub async fn storefronts<S: AsRef<str> + Sync>(&self, storefront_ids: &[S]) -> FetchOutcome {
        self.send(&self.factory.storefronts(storefront_ids)).await
    }

    /// Every storefront
    pub async fn all_storefronts(&self) -> FetchOutcome {
        self.send(&self.factory.all_storefronts()).await
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// A catalog album, artist, song or playlist
    pub async fn catalog_resource(
        &self,
        storefront: &str,
        kind: ResourceKind,
        id: &str,
    ) -> FetchOutcome {
        self.send(&self.factory.catalog_resource(storefront, kind, id))
            .await
    }

    /// Several catalog resources of one kind
    pub async fn catalog_resources<S: AsRef<str> + Sync>(
        &self,
        storefront: &str,
        kind: ResourceKind,
        ids: &[S],
    ) -> FetchOutcome {
        self.send(&self.factory.catalog_resources(storefront, kind, ids))
            .await
    }

    /// A catalog resource's relationship
    pub async fn catalog_relationship(
        &self,
        storefront: &str,
        kind: ResourceKind,
        id: &str,
        relationship: &str,
    ) -> FetchOutcome {
        self.send(
            &self
                .factory
                .catalog_relationship(storefront, kind, id, relationship),
        )
        .await
    }

    /// Catalog search over songs and albums
    pub async fn search(&self, storefront: &str, term: &str) -> FetchOutcome {
        self.send(&self.factory.search(storefront, term)).await
    }

    // ========================================================================
    // Library
    // ========================================================================

    /// A library album, artist, song or playlist
    pub async fn library_resource(&self, kind: ResourceKind, id: &str) -> FetchOutcome {
        self.send(&self.factory.library_resource(kind, id)).await
    }

    /// Several library resources of one kind
    pub async fn library_resources<S: AsRef<str> + Sync>(
        &self,
        kind: ResourceKind,
        ids: &[S],
    ) -> FetchOutcome {
        self.send(&self.factory.library_resources(kind, ids)).await
    }

    /// First page of a library collection
    pub async fn all_library_resources(&self, kind: ResourceKind) -> FetchOutcome {
        self.send(&self.factory.all_library_resources(kind)).await
    }

    /// A library resource's relationship
    pub async fn library_relationship(
        &self,
        kind: ResourceKind,
        id: &str,
        relationship: &str,
    ) -> FetchOutcome {
        self.send(&self.factory.library_relationship(kind, id, relationship))
            .await
    }

    /// Recently played resources
    pub async fn recently_played(&self) -> FetchOutcome {
        self.send(&self.factory.recently_played()).await
    }

    /// Add catalog resources to the library
    pub async fn add_to_library(&self, resources: &LibraryAdditions) -> FetchOutcome {
        self.send(&self.factory.add_to_library(resources)).await
    }

    /// Create a library playlist
    pub async fn create_playlist<S: AsRef<str> + Sync>(
        &self,
        name: &str,
        description: &str,
        song_ids: &[S],
    ) -> FetchOutcome {
        self.send(&self.factory.create_playlist(name, description, song_ids))
            .await
    }

    /// Append songs to a library playlist
    pub async fn add_tracks_to_playlist<S: AsRef<str> + Sync>(
        &self,
        playlist_id: &str,
        song_ids: &[S],
    ) -> FetchOutcome {
        self.send(&self.factory.add_tracks_to_playlist(playlist_id, song_ids))
            .await
    }

    // ========================================================================
    // Paginated library listings
    // ========================================================================

    /// Paginator over a library collection
    pub fn library_paginator(
        &self,
        kind: ResourceKind,
    ) -> std::result::Result<Paginator, PaginationError> {
        let factory = self.factory.clone();
        Paginator::new(Arc::clone(&self.transport), &self.pagination, move |offset| {
            factory.library_page(kind, offset)
        })
    }

    /// Paginator over the user's library songs
    pub fn library_songs(&self) -> std::result::Result<Paginator, PaginationError> {
        self.library_paginator(ResourceKind::Songs)
    }

    /// Paginator over the user's library playlists
    pub fn library_playlists(&self) -> std::result::Result<Paginator, PaginationError> {
        self.library_paginator(ResourceKind::Playlists)
    }

    /// Every item of a library collection, merged into one array
    pub async fn fetch_all_library(
        &self,
        kind: ResourceKind,
    ) -> std::result::Result<Value, PaginationError> {
        info!("Fetching all library {kind}");
        self.library_paginator(kind)?.collect().await
    }

    /// Every song in the user's library
    pub async fn fetch_all_library_songs(&self) -> std::result::Result<Value, PaginationError> {
        self.fetch_all_library(ResourceKind::Songs).await
    }

    /// Every playlist in the user's library
    pub async fn fetch_all_library_playlists(
        &self,
    ) -> std::result::Result<Value, PaginationError> {
        self.fetch_all_library(ResourceKind::Playlists).await
    }
}

impl std::fmt::Debug for MusicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicClient")
            .field("factory", &self.factory)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}
