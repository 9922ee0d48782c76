//! Response decoder

use super::status::classify_status;
use super::transport::classify_transport_error;
use super::types::{FailureCause, FetchOutcome};
use crate::http::{RawResponse, TransportError};
use serde_json::Value;
use tracing::{debug, warn};

/// Payload reported for a successful response without a usable body
pub const MISSING_BODY_SENTINEL: &str = "NA";

/// Decode a raw transport outcome
///
/// First match wins:
/// 1. protocol/encoding error: `Encoding` with the normalized status
/// 2. network error: `Transport`
/// 3. status present: `Success(body)` or `Status` (no underlying error)
/// 4. otherwise: `Unknown`
pub fn decode_response(response: RawResponse) -> FetchOutcome {
    let RawResponse {
        status, body, error, ..
    } = response;

    match error {
        Some(TransportError::Protocol(error)) => {
            let status =
                classify_transport_error(&TransportError::Protocol(error.clone()), status);
            debug!("Protocol error, normalized status: {status:?}");
            return FetchOutcome::Failure(FailureCause::Encoding { error, status });
        }
        Some(TransportError::Network(error)) => {
            let status = classify_transport_error(&TransportError::Network(error.clone()), status);
            return FetchOutcome::Failure(FailureCause::Transport { error, status });
        }
        None => {}
    }

    let Some(code) = status else {
        warn!("No HTTP status code, check internet availability and retry the request");
        return FetchOutcome::Failure(FailureCause::Unknown);
    };

    debug!("Request status code: {code}");
    let outcome = classify_status(code);

    if outcome.is_success {
        debug!("{code} {}", outcome.code_name);
        debug!("{}", outcome.description);
        FetchOutcome::Success(body.unwrap_or_else(|| Value::String(MISSING_BODY_SENTINEL.into())))
    } else {
        warn!("{code} {}", outcome.code_name);
        debug!("{}", outcome.description);
        FetchOutcome::Failure(FailureCause::Status { code, outcome })
    }
}
