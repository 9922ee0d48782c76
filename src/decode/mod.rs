//! Response decoder module
//!
//! Turns a raw transport outcome into a [`FetchOutcome`].
//!
//! # Overview
//!
//! - [`classify_status`] - HTTP status code to [`StatusOutcome`] (pure, total)
//! - [`classify_transport_error`] - normalizes the status code of a transport
//!   failure and logs its detail
//! - [`decode_response`] - combines both into `Success(json)` or one of the
//!   failure causes
//!
//! Decision order: protocol errors, then network errors, then the HTTP
//! status, then "no status at all". A malformed request never reaches
//! status interpretation, and a clean unsuccessful status never carries an
//! underlying error.

mod decoder;
mod status;
mod transport;
mod types;

pub use decoder::{decode_response, MISSING_BODY_SENTINEL};
pub use status::classify_status;
pub use transport::classify_transport_error;
pub use types::{FailureCause, FetchOutcome, StatusOutcome};
