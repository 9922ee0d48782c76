//! Decoder types
//!
//! Outcome types produced by the response decoder.

use crate::error::Error;
use crate::http::{NetworkError, ProtocolError, TransportError};
use serde_json::Value;

/// Semantic meaning of an HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOutcome {
    /// Whether the status means the request succeeded
    pub is_success: bool,
    /// Machine-readable name (e.g. "Not Found")
    pub code_name: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

/// Decoded result of one request
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Successful status; the parsed body, or the "NA" sentinel
    Success(Value),
    /// Anything else
    Failure(FailureCause),
}

impl FetchOutcome {
    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The payload of a success
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The cause of a failure
    pub fn cause(&self) -> Option<&FailureCause> {
        match self {
            Self::Success(_) => None,
            Self::Failure(cause) => Some(cause),
        }
    }

    /// Convert into a `Result`, folding the cause into [`Error`]
    pub fn into_result(self) -> crate::Result<Value> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(cause) => Err(cause.into()),
        }
    }
}

/// Why a request did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// Malformed request, or a response that failed validation/serialization
    Encoding {
        /// The original error
        error: ProtocolError,
        /// Status code after normalization
        status: Option<u16>,
    },
    /// The request never completed
    Transport {
        /// The original error
        error: NetworkError,
        /// Status code observed, if any
        status: Option<u16>,
    },
    /// A clean HTTP response with an unsuccessful status; no underlying error
    Status {
        /// HTTP status code
        code: u16,
        /// Classified meaning
        outcome: StatusOutcome,
    },
    /// No status code obtained at all
    Unknown,
}

impl FailureCause {
    /// Normalized status code, if one is known
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Encoding { status, .. } | Self::Transport { status, .. } => *status,
            Self::Status { code, .. } => Some(*code),
            Self::Unknown => None,
        }
    }

    /// The underlying transport error; `None` for status and unknown failures
    pub fn underlying_error(&self) -> Option<TransportError> {
        match self {
            Self::Encoding { error, .. } => Some(TransportError::Protocol(error.clone())),
            Self::Transport { error, .. } => Some(TransportError::Network(error.clone())),
            Self::Status { .. } | Self::Unknown => None,
        }
    }
}

impl From<FailureCause> for Error {
    fn from(cause: FailureCause) -> Self {
        match cause {
            FailureCause::Encoding { error, .. } => Error::Transport(error.into()),
            FailureCause::Transport { error, .. } => Error::Transport(error.into()),
            FailureCause::Status { code, outcome } => Error::Status {
                code,
                name: outcome.code_name,
                description: outcome.description,
            },
            FailureCause::Unknown => Error::NoStatus,
        }
    }
}
