//! CLI module
//!
//! Command-line interface over [`MusicClient`](crate::MusicClient).
//!
//! # Commands
//!
//! - `storefront` - The signed-in user's storefront
//! - `storefronts` - Storefronts by id, or all of them
//! - `search` - Catalog search over songs and albums
//! - `song` - A catalog song
//! - `recent` - Recently played resources
//! - `songs` - Every song in the user's library
//! - `playlists` - Every playlist in the user's library

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
