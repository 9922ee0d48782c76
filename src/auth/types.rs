//! Credential types

/// The developer token and, for personal endpoints, the music user token
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Developer token identifying the API consumer
    pub developer_token: String,
    /// Music user token identifying the signed-in user
    pub user_token: Option<String>,
}

impl Credentials {
    /// Credentials for catalog-only access
    pub fn new(developer_token: impl Into<String>) -> Self {
        Self {
            developer_token: developer_token.into(),
            user_token: None,
        }
    }

    /// Credentials for catalog and library access
    pub fn with_user_token(
        developer_token: impl Into<String>,
        user_token: impl Into<String>,
    ) -> Self {
        Self {
            developer_token: developer_token.into(),
            user_token: Some(user_token.into()),
        }
    }

    /// Check if a music user token is present
    pub fn has_user_token(&self) -> bool {
        self.user_token.is_some()
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("developer_token", &"<redacted>")
            .field(
                "user_token",
                &self.user_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Which credentials an endpoint needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    /// Catalog endpoints: developer token only
    Catalog,
    /// Personal endpoints: developer token and music user token
    Library,
}
