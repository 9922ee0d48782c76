//! Error types for HummingKit
//!
//! This module defines the error hierarchy for the entire crate.
//! All fallible public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Pagination runs report through [`crate::pagination::PaginationError`], which
//! keeps the partial accumulator next to the cause; it converts into [`Error`]
//! when the partial result is not needed.

use crate::http::TransportError;
use thiserror::Error;

/// The main error type for HummingKit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("HTTP {code} {name}: {description}")]
    Status {
        code: u16,
        name: &'static str,
        description: &'static str,
    },

    #[error("No HTTP status code received, check internet availability and retry the request")]
    NoStatus,

    // ============================================================================
    // Response Processing Errors
    // ============================================================================
    #[error("Response corrupted: {message}")]
    ResponseCorrupted { message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to merge page {page}: {message}")]
    Merge { page: usize, message: String },

    #[error("Pagination cancelled")]
    Cancelled,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a corrupted response error
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::ResponseCorrupted {
            message: message.into(),
        }
    }

    /// Create a merge error
    pub fn merge(page: usize, message: impl Into<String>) -> Self {
        Self::Merge {
            page,
            message: message.into(),
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { code, .. } => Some(*code),
            Error::Transport(e) => e.status_code(),
            _ => None,
        }
    }

    /// Check if this error is retryable
    ///
    /// Nothing in the crate retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(TransportError::Network(_)) | Error::NoStatus => true,
            Error::Status { code, .. } => is_retryable_status(*code),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 503)
}

/// Result type alias for HummingKit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
