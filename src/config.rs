//! Client configuration
//!
//! [`ClientConfig`] is read from a YAML or JSON file (chosen by extension),
//! then overlaid with environment variables. Every field except the
//! developer token has a default.
//!
//! ```yaml
//! developer_token: eyJhbGciOi...
//! user_token: AkQ...
//! base_url: https://api.music.apple.com
//! timeout_secs: 30
//! validate_responses: false
//! pagination:
//!   merge_policy: strict
//!   offset_pattern: '(\d{2,})'
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::pagination::{MergePolicy, PaginatorConfig};
use crate::request::DEFAULT_BASE_URL;
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the developer token
pub const ENV_DEVELOPER_TOKEN: &str = "HUMMINGKIT_DEVELOPER_TOKEN";
/// Environment variable overriding the music user token
pub const ENV_USER_TOKEN: &str = "HUMMINGKIT_USER_TOKEN";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "HUMMINGKIT_BASE_URL";

/// Configuration for a [`MusicClient`](crate::MusicClient)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Developer token (required)
    #[serde(default)]
    pub developer_token: Option<String>,

    /// Music user token, needed for `/v1/me` endpoints
    #[serde(default)]
    pub user_token: Option<String>,

    /// API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Validate status codes and content types before decoding (opt-in)
    #[serde(default)]
    pub validate_responses: bool,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginatorConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("hummingkit/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            developer_token: None,
            user_token: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            validate_responses: false,
            headers: HashMap::new(),
            pagination: PaginatorConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load a config file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from the process environment
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup
    ///
    /// Unset and blank variables leave the config untouched.
    #[must_use]
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(ENV_DEVELOPER_TOKEN).none_if_empty() {
            self.developer_token = Some(token);
        }
        if let Some(token) = lookup(ENV_USER_TOKEN).none_if_empty() {
            self.user_token = Some(token);
        }
        if let Some(url) = lookup(ENV_BASE_URL).none_if_empty() {
            self.base_url = url;
        }
        self
    }

    /// Check the values that have no meaningful fallback
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Credentials from the configured tokens
    pub fn credentials(&self) -> Result<Credentials> {
        let developer_token = self
            .developer_token
            .clone()
            .none_if_empty()
            .ok_or_else(|| Error::missing_field("developer_token"))?;

        Ok(Credentials {
            developer_token,
            user_token: self.user_token.clone().none_if_empty(),
        })
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings for the HTTP transport
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .timeout(self.timeout())
            .validate_responses(self.validate_responses)
            .user_agent(&self.user_agent);

        self.headers
            .iter()
            .fold(builder, |builder, (key, value)| builder.header(key, value))
            .build()
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |token: &Option<String>| token.as_ref().map(|_| "<redacted>");
        f.debug_struct("ClientConfig")
            .field("developer_token", &redact(&self.developer_token))
            .field("user_token", &redact(&self.user_token))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("validate_responses", &self.validate_responses)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("pagination", &self.pagination)
            .finish()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the developer token
    pub fn developer_token(mut self, token: impl Into<String>) -> Self {
        self.config.developer_token = Some(token.into());
        self
    }

    /// Set the music user token
    pub fn user_token(mut self, token: impl Into<String>) -> Self {
        self.config.user_token = Some(token.into());
        self
    }

    /// Set the API host
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Turn response validation on or off
    pub fn validate_responses(mut self, validate: bool) -> Self {
        self.config.validate_responses = validate;
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set the merge policy
    pub fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.config.pagination.merge_policy = policy;
        self
    }

    /// Set the offset pattern
    pub fn offset_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pagination.offset_pattern = pattern.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::DEFAULT_OFFSET_PATTERN;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.music.apple.com");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("hummingkit/"));
        assert!(!config.validate_responses);
        assert_eq!(config.pagination.merge_policy, MergePolicy::Strict);
        assert_eq!(config.pagination.offset_pattern, DEFAULT_OFFSET_PATTERN);
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config = ClientConfig::from_yaml_str("developer_token: dev\n").unwrap();
        assert_eq!(config.developer_token.as_deref(), Some("dev"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
developer_token: dev
user_token: user
base_url: http://localhost:8080
timeout_secs: 5
validate_responses: true
headers:
  X-Trace: abc
pagination:
  merge_policy: lenient
  offset_pattern: 'offset=(\d+)'
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.user_token.as_deref(), Some("user"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.validate_responses);
        assert_eq!(config.headers.get("X-Trace").map(String::as_str), Some("abc"));
        assert_eq!(config.pagination.merge_policy, MergePolicy::Lenient);
        assert_eq!(config.pagination.offset_pattern, r"offset=(\d+)");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ClientConfig::from_yaml_str("timeout_secs: [").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ClientConfig::from_yaml_str("timeout_secs: 0").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "developer_token: from-file").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.developer_token.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"developer_token": "dev", "pagination": {{"merge_policy": "lenient"}}}}"#
        )
        .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.developer_token.as_deref(), Some("dev"));
        assert_eq!(config.pagination.merge_policy, MergePolicy::Lenient);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load("/nonexistent/hummingkit.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DEVELOPER_TOKEN, "env-dev"),
            (ENV_USER_TOKEN, "  "),
            (ENV_BASE_URL, "http://127.0.0.1:1234"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::builder()
            .developer_token("file-dev")
            .user_token("file-user")
            .build()
            .apply_env_from(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.developer_token.as_deref(), Some("env-dev"));
        assert_eq!(config.user_token.as_deref(), Some("file-user"));
        assert_eq!(config.base_url, "http://127.0.0.1:1234");
    }

    #[test]
    fn test_credentials() {
        let config = ClientConfig::builder()
            .developer_token("dev")
            .user_token("")
            .build();
        let creds = config.credentials().unwrap();
        assert_eq!(creds.developer_token, "dev");
        assert!(!creds.has_user_token());

        let err = ClientConfig::default().credentials().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "developer_token"));
    }

    #[test]
    fn test_http_config() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(7))
            .validate_responses(true)
            .header("X-Trace", "abc")
            .build();
        let http = config.http_config();

        assert_eq!(http.timeout, Duration::from_secs(7));
        assert!(http.validate_responses);
        assert_eq!(http.default_headers.get("X-Trace").map(String::as_str), Some("abc"));
        assert_eq!(http.user_agent, config.user_agent);
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = ClientConfig::builder()
            .developer_token("secret-dev")
            .user_token("secret-user")
            .build();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-dev"));
        assert!(!debug.contains("secret-user"));
    }
}
