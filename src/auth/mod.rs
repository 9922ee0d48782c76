//! Authentication module
//!
//! Apple Music requests carry up to two opaque credentials:
//!
//! - the developer token, sent on every request as `Authorization: Bearer <token>`
//! - the music user token, sent as `Music-User-Token` on endpoints scoped to
//!   the signed-in user's library (`/v1/me/...`)
//!
//! Acquiring and storing either token happens outside this crate.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, AUTHORIZATION_HEADER, MUSIC_USER_TOKEN_HEADER};
pub use types::{Credentials, TokenScope};

#[cfg(test)]
mod tests;
