//! Authenticator implementation
//!
//! Applies credential headers to request descriptors.

use super::types::{Credentials, TokenScope};
use crate::request::RequestDescriptor;
use tracing::warn;

/// Header carrying the developer token
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Header carrying the music user token
pub const MUSIC_USER_TOKEN_HEADER: &str = "Music-User-Token";

/// Authenticator handles applying credentials to requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
}

impl Authenticator {
    /// Create a new authenticator
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// The credentials this authenticator applies
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Apply authentication headers for the given scope
    ///
    /// A library-scoped request without a user token is still built; the
    /// server answers it with 401/403, which the status classifier reports.
    pub fn apply(&self, request: RequestDescriptor, scope: TokenScope) -> RequestDescriptor {
        let request = request.header(
            AUTHORIZATION_HEADER,
            format!("Bearer {}", self.credentials.developer_token),
        );

        match scope {
            TokenScope::Catalog => request,
            TokenScope::Library => match &self.credentials.user_token {
                Some(token) => request.header(MUSIC_USER_TOKEN_HEADER, token.as_str()),
                None => {
                    warn!("No music user token for library request to {}", request.url);
                    request
                }
            },
        }
    }
}
