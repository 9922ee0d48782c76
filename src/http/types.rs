//! Transport types
//!
//! The raw outcome of executing one request, and the transport-level
//! failures that can stand in for an HTTP status.

use crate::request::RequestDescriptor;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use thiserror::Error;

/// Executes a request descriptor and reports what came back
///
/// Implementations never fail: every problem is folded into
/// [`RawResponse::error`] so the decoder can classify it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request
    async fn execute(&self, request: &RequestDescriptor) -> RawResponse;
}

/// What the transport observed for one request
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code, if a status line was received
    pub status: Option<u16>,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, if present and parseable
    pub body: Option<Value>,
    /// Transport-level failure, if any
    pub error: Option<TransportError>,
}

impl RawResponse {
    /// A response with a status and an optional body
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self {
            status: Some(status),
            body,
            ..Default::default()
        }
    }

    /// A response carrying a JSON body
    pub fn json(status: u16, body: Value) -> Self {
        Self::new(status, Some(body))
    }

    /// A failed exchange
    pub fn failed(error: impl Into<TransportError>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Nothing came back at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach the observed status code
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach response headers
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

// ============================================================================
// Transport Errors
// ============================================================================

/// A transport-layer failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request was malformed or the response failed validation/serialization
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// The request never completed (DNS, timeout, offline, ...)
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl TransportError {
    /// Check if this is a protocol/encoding-class error
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Check if this is a network/connectivity-class error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Status code embedded in the error itself
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Protocol(ProtocolError::ResponseValidationFailed {
                reason: ValidationFailureReason::UnacceptableStatusCode { code },
            }) => Some(*code),
            _ => None,
        }
    }
}

/// Protocol/encoding-class failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Invalid URL: {url} ({reason})")]
    InvalidUrl { url: String, reason: String },

    #[error("Parameter encoding failed: {reason}")]
    ParameterEncodingFailed { reason: String },

    #[error("Multipart encoding failed: {reason}")]
    MultipartEncodingFailed { reason: String },

    #[error("Response validation failed: {reason}")]
    ResponseValidationFailed { reason: ValidationFailureReason },

    #[error("Response serialization failed: {reason}")]
    ResponseSerializationFailed { reason: String },
}

/// Why response validation rejected a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailureReason {
    #[error("response data file was nil")]
    DataFileNil,

    #[error("response data file could not be read")]
    DataFileReadFailed,

    #[error("content type missing, acceptable: {acceptable:?}")]
    MissingContentType { acceptable: Vec<String> },

    #[error("content type {response} was unacceptable, acceptable: {acceptable:?}")]
    UnacceptableContentType {
        acceptable: Vec<String>,
        response: String,
    },

    #[error("status code {code} was unacceptable")]
    UnacceptableStatusCode { code: u16 },
}

/// Network/connectivity-class failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct NetworkError {
    /// What went wrong
    pub kind: NetworkErrorKind,
    /// Detail from the underlying client
    pub message: String,
}

impl NetworkError {
    /// Create a network error
    pub fn new(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Category of network failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Dns,
    Connect,
    Offline,
    Other,
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NetworkErrorKind::Timeout => "request timed out",
            NetworkErrorKind::Dns => "host lookup failed",
            NetworkErrorKind::Connect => "connection failed",
            NetworkErrorKind::Offline => "network offline",
            NetworkErrorKind::Other => "network error",
        };
        f.write_str(name)
    }
}
