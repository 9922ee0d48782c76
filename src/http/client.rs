//! HTTP client backed by reqwest
//!
//! Executes request descriptors and reports a [`RawResponse`]:
//! - URL and header problems become protocol errors before anything is sent
//! - Connectivity problems become network errors
//! - With validation on, non-2xx statuses and non-JSON bodies become
//!   response validation errors that still carry the observed status

use super::types::{
    NetworkError, NetworkErrorKind, ProtocolError, RawResponse, Transport, TransportError,
    ValidationFailureReason,
};
use crate::error::Result;
use crate::request::RequestDescriptor;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Content types accepted when validating responses
pub const ACCEPTABLE_CONTENT_TYPES: &[&str] = &["application/json"];

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Validate status codes and content types of responses
    pub validate_responses: bool,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            validate_responses: false,
            default_headers: HashMap::new(),
            user_agent: format!("hummingkit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Turn response validation on or off
    pub fn validate_responses(mut self, validate: bool) -> Self {
        self.config.validate_responses = validate;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP transport over reqwest
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    async fn send(&self, request: &RequestDescriptor) -> RawResponse {
        let url = match request.full_url() {
            Ok(url) => url,
            Err(e) => {
                return RawResponse::failed(ProtocolError::InvalidUrl {
                    url: request.url.clone(),
                    reason: e.to_string(),
                })
            }
        };

        let mut req = self.client.request(request.method.into(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => return RawResponse::failed(classify_reqwest_error(&e)),
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        debug!("{} {} -> {}", request.method, request.url, status);

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return RawResponse::failed(ProtocolError::ResponseSerializationFailed {
                    reason: e.to_string(),
                })
                .with_status(status)
                .with_headers(headers)
            }
        };

        if self.config.validate_responses {
            if let Some(reason) = validate(status, &headers, bytes.is_empty()) {
                return RawResponse::failed(ProtocolError::ResponseValidationFailed { reason })
                    .with_status(status)
                    .with_headers(headers);
            }
        }

        let body = if bytes.is_empty() {
            None
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Response body is not JSON: {e}");
                    None
                }
            }
        };

        RawResponse::new(status, body).with_headers(headers)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: &RequestDescriptor) -> RawResponse {
        self.send(request).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Check status and content type the way a validating client would
pub(super) fn validate(
    status: u16,
    headers: &reqwest::header::HeaderMap,
    body_is_empty: bool,
) -> Option<ValidationFailureReason> {
    if !(200..300).contains(&status) {
        return Some(ValidationFailureReason::UnacceptableStatusCode { code: status });
    }

    // Empty bodies (204) carry no content type worth checking
    if body_is_empty {
        return None;
    }

    let acceptable: Vec<String> = ACCEPTABLE_CONTENT_TYPES
        .iter()
        .map(ToString::to_string)
        .collect();

    match headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        None => Some(ValidationFailureReason::MissingContentType { acceptable }),
        Some(content_type) => {
            let mime = content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            if is_json_mime(&mime) {
                None
            } else {
                Some(ValidationFailureReason::UnacceptableContentType {
                    acceptable,
                    response: content_type.to_string(),
                })
            }
        }
    }
}

fn is_json_mime(mime: &str) -> bool {
    ACCEPTABLE_CONTENT_TYPES.contains(&mime) || mime.ends_with("+json")
}

/// Map a reqwest error to a transport error
fn classify_reqwest_error(e: &reqwest::Error) -> TransportError {
    let message = e.to_string();

    if e.is_builder() {
        return ProtocolError::ParameterEncodingFailed { reason: message }.into();
    }
    if e.is_decode() {
        return ProtocolError::ResponseSerializationFailed { reason: message }.into();
    }

    let kind = if e.is_timeout() {
        NetworkErrorKind::Timeout
    } else if e.is_connect() {
        if error_chain_mentions(e, "dns") {
            NetworkErrorKind::Dns
        } else {
            NetworkErrorKind::Connect
        }
    } else {
        NetworkErrorKind::Other
    };

    NetworkError::new(kind, message).into()
}

fn error_chain_mentions(e: &reqwest::Error, needle: &str) -> bool {
    let mut source: Option<&dyn std::error::Error> = Some(e);
    while let Some(err) = source {
        if err.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }
        source = err.source();
    }
    false
}
