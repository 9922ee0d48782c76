//! HTTP transport module
//!
//! The [`Transport`] seam between request descriptors and the network, and
//! its reqwest implementation [`HttpClient`].
//!
//! # Features
//!
//! - **Never fails**: every problem is folded into a [`RawResponse`]
//! - **Error taxonomy**: protocol/encoding failures vs network failures
//! - **Response validation**: optional status and content-type checks

mod client;
mod types;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, ACCEPTABLE_CONTENT_TYPES};
pub use types::{
    NetworkError, NetworkErrorKind, ProtocolError, RawResponse, Transport, TransportError,
    ValidationFailureReason,
};
