//! Endpoint request factory
//!
//! One builder per Apple Music endpoint. Builders are pure: they only
//! assemble URLs, query parameters, headers and bodies, and never fail.

use super::types::RequestDescriptor;
use crate::auth::{Authenticator, Credentials, TokenScope};
use crate::types::ResourceKind;
use serde_json::{json, Value};

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.music.apple.com";

/// Page size for library listings (the server's documented maximum)
pub const LIBRARY_PAGE_LIMIT: u32 = 100;

/// Result count for catalog search
pub const SEARCH_LIMIT: u32 = 10;

/// Resource types requested by catalog search
pub const SEARCH_TYPES: &str = "songs,albums";

/// Builds request descriptors for every supported endpoint
#[derive(Debug, Clone)]
pub struct RequestFactory {
    base_url: String,
    authenticator: Authenticator,
}

impl RequestFactory {
    /// Create a factory against the default API host
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, credentials)
    }

    /// Create a factory against a custom host
    pub fn with_base_url(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            authenticator: Authenticator::new(credentials),
        }
    }

    /// Base URL requests are built against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credentials applied to every request
    pub fn credentials(&self) -> &Credentials {
        self.authenticator.credentials()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn catalog(&self, request: RequestDescriptor) -> RequestDescriptor {
        self.authenticator.apply(request, TokenScope::Catalog)
    }

    fn library(&self, request: RequestDescriptor) -> RequestDescriptor {
        self.authenticator.apply(request, TokenScope::Library)
    }

    // ========================================================================
    // Storefronts
    // ========================================================================

    /// Storefront of the signed-in user's account
    pub fn user_storefront(&self) -> RequestDescriptor {
        self.library(RequestDescriptor::get(self.url("/v1/me/storefront")))
    }

    /// A single storefront
    pub fn storefront(&self, storefront_id: &str) -> RequestDescriptor {
        self.catalog(RequestDescriptor::get(
            self.url(&format!("/v1/storefronts/{storefront_id}")),
        ))
    }

    /// Several storefronts by id
    pub fn storefronts<S: AsRef<str>>(&self, storefront_ids: &[S]) -> RequestDescriptor {
        self.catalog(
            RequestDescriptor::get(self.url("/v1/storefronts")).query("ids", join_ids(storefront_ids)),
        )
    }

    /// Every storefront
    pub fn all_storefronts(&self) -> RequestDescriptor {
        self.catalog(RequestDescriptor::get(self.url("/v1/storefronts")))
    }

    // ========================================================================
    // Catalog resources
    // ========================================================================

    /// A catalog album, artist, song or playlist
    pub fn catalog_resource(
        &self,
        storefront: &str,
        kind: ResourceKind,
        id: &str,
    ) -> RequestDescriptor {
        self.catalog(RequestDescriptor::get(
            self.url(&format!("/v1/catalog/{storefront}/{kind}/{id}")),
        ))
    }

    /// Several catalog resources of one kind
    pub fn catalog_resources<S: AsRef<str>>(
        &self,
        storefront: &str,
        kind: ResourceKind,
        ids: &[S],
    ) -> RequestDescriptor {
        self.catalog(
            RequestDescriptor::get(self.url(&format!("/v1/catalog/{storefront}/{kind}")))
                .query("ids", join_ids(ids)),
        )
    }

    /// A catalog resource's relationship, fetched directly by name
    pub fn catalog_relationship(
        &self,
        storefront: &str,
        kind: ResourceKind,
        id: &str,
        relationship: &str,
    ) -> RequestDescriptor {
        self.catalog(RequestDescriptor::get(self.url(&format!(
            "/v1/catalog/{storefront}/{kind}/{id}/{relationship}"
        ))))
    }

    /// Catalog search over songs and albums
    ///
    /// Spaces in `term` go out as `+` through form encoding.
    pub fn search(&self, storefront: &str, term: &str) -> RequestDescriptor {
        self.catalog(
            RequestDescriptor::get(self.url(&format!("/v1/catalog/{storefront}/search")))
                .query("term", term)
                .query("limit", SEARCH_LIMIT.to_string())
                .query("types", SEARCH_TYPES),
        )
    }

    // ========================================================================
    // Library resources
    // ========================================================================

    /// A library album, artist, song or playlist
    pub fn library_resource(&self, kind: ResourceKind, id: &str) -> RequestDescriptor {
        self.library(RequestDescriptor::get(
            self.url(&format!("/v1/me/library/{kind}/{id}")),
        ))
    }

    /// Several library resources of one kind
    pub fn library_resources<S: AsRef<str>>(
        &self,
        kind: ResourceKind,
        ids: &[S],
    ) -> RequestDescriptor {
        self.library(
            RequestDescriptor::get(self.url(&format!("/v1/me/library/{kind}")))
                .query("ids", join_ids(ids)),
        )
    }

    /// First page of a library collection, at the server's default page size
    pub fn all_library_resources(&self, kind: ResourceKind) -> RequestDescriptor {
        self.library(RequestDescriptor::get(
            self.url(&format!("/v1/me/library/{kind}")),
        ))
    }

    /// A library resource's relationship, fetched directly by name
    pub fn library_relationship(
        &self,
        kind: ResourceKind,
        id: &str,
        relationship: &str,
    ) -> RequestDescriptor {
        self.library(RequestDescriptor::get(
            self.url(&format!("/v1/me/library/{kind}/{id}/{relationship}")),
        ))
    }

    /// One page of the user's library songs
    pub fn library_songs_page(&self, offset: &str) -> RequestDescriptor {
        self.library_page(ResourceKind::Songs, offset)
    }

    /// One page of the user's library playlists
    pub fn library_playlists_page(&self, offset: &str) -> RequestDescriptor {
        self.library_page(ResourceKind::Playlists, offset)
    }

    /// One page of any library collection
    pub fn library_page(&self, kind: ResourceKind, offset: &str) -> RequestDescriptor {
        self.library(
            RequestDescriptor::get(self.url(&format!("/v1/me/library/{kind}")))
                .query("limit", LIBRARY_PAGE_LIMIT.to_string())
                .query("offset", offset),
        )
    }

    /// Recently played resources
    pub fn recently_played(&self) -> RequestDescriptor {
        self.library(RequestDescriptor::get(self.url("/v1/me/recent/played")))
    }

    // ========================================================================
    // Library modification
    // ========================================================================

    /// Add catalog resources to the user's library
    pub fn add_to_library(&self, resources: &LibraryAdditions) -> RequestDescriptor {
        let mut request = RequestDescriptor::post(self.url("/v1/me/library"));
        for (kind, ids) in [
            (ResourceKind::Songs, &resources.songs),
            (ResourceKind::Albums, &resources.albums),
            (ResourceKind::Playlists, &resources.playlists),
            (ResourceKind::MusicVideos, &resources.music_videos),
        ] {
            for id in ids {
                request = request.query(format!("ids[{kind}]"), id.as_str());
            }
        }
        self.library(request)
    }

    /// Create a new playlist in the user's library
    pub fn create_playlist<S: AsRef<str>>(
        &self,
        name: &str,
        description: &str,
        song_ids: &[S],
    ) -> RequestDescriptor {
        let body = json!({
            "attributes": {
                "name": name,
                "description": description,
            },
            "relationships": {
                "tracks": { "data": song_refs(song_ids) },
            },
        });
        self.library(RequestDescriptor::post(self.url("/v1/me/library/playlists")).json(body))
    }

    /// Append songs to the end of a library playlist
    pub fn add_tracks_to_playlist<S: AsRef<str>>(
        &self,
        playlist_id: &str,
        song_ids: &[S],
    ) -> RequestDescriptor {
        let body = json!({ "data": song_refs(song_ids) });
        self.library(
            RequestDescriptor::post(
                self.url(&format!("/v1/me/library/playlists/{playlist_id}/tracks")),
            )
            .json(body),
        )
    }
}

/// Catalog ids to add to the library, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryAdditions {
    pub songs: Vec<String>,
    pub albums: Vec<String>,
    pub playlists: Vec<String>,
    pub music_videos: Vec<String>,
}

impl LibraryAdditions {
    /// Check if there is nothing to add
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
            && self.albums.is_empty()
            && self.playlists.is_empty()
            && self.music_videos.is_empty()
    }
}

fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

fn song_refs<S: AsRef<str>>(song_ids: &[S]) -> Value {
    Value::Array(
        song_ids
            .iter()
            .map(|id| json!({ "id": id.as_ref(), "type": "songs" }))
            .collect(),
    )
}
