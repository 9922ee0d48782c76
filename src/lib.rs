// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # HummingKit
//!
//! An async client for the Apple Music API.
//!
//! ## Features
//!
//! - **Request Building**: One builder per endpoint, developer and music user tokens applied
//! - **Status Classification**: Every documented status code mapped to a name and description
//! - **Transport Errors**: Protocol and network failures kept apart from HTTP statuses
//! - **Library Pagination**: Fetch-and-merge over `offset` cursors, cancellable, partial results on failure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hummingkit::{ClientConfig, MusicClient};
//!
//! #[tokio::main]
//! async fn main() -> hummingkit::Result<()> {
//!     let config = ClientConfig::builder()
//!         .developer_token("eyJhbGciOi...")
//!         .user_token("AkQ...")
//!         .build();
//!     let client = MusicClient::new(&config)?;
//!
//!     // Single request
//!     let storefront = client.user_storefront().await.into_result()?;
//!
//!     // Every library song, page by page
//!     let songs = client.fetch_all_library_songs().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         MusicClient                          │
//! │  user_storefront()  search()  ...  fetch_all_library_songs() │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬──────────────┬───┴──────────┬──────────────────────┐
//! │  Request  │  Transport   │    Decode    │      Paginate        │
//! ├───────────┼──────────────┼──────────────┼──────────────────────┤
//! │ Factory   │ reqwest      │ Status       │ Offset extraction    │
//! │ Auth      │ Validation   │ Transport    │ Merge                │
//! │           │              │ Response     │ Cancellation         │
//! └───────────┴──────────────┴──────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Developer and music user tokens
pub mod auth;

/// Request descriptors and the endpoint factory
pub mod request;

/// HTTP transport with response validation
pub mod http;

/// Status, transport error and response decoding
pub mod decode;

/// Paginated fetch-and-merge
pub mod pagination;

/// `(success, error, result)` completion view
pub mod completion;

/// Client configuration
pub mod config;

/// Apple Music client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::Credentials;
pub use client::MusicClient;
pub use completion::Completion;
pub use config::ClientConfig;
pub use decode::{FailureCause, FetchOutcome};
pub use pagination::{CancelHandle, PaginationError, Paginator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
