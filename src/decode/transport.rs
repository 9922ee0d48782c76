//! Transport error classification

use crate::http::{ProtocolError, TransportError, ValidationFailureReason};
use tracing::{debug, warn};

/// Normalize the status code of a transport failure
///
/// Only an unacceptable-status validation failure changes the code: the
/// status it carries replaces `status`. Every other error passes `status`
/// through unchanged and only contributes log lines.
pub fn classify_transport_error(error: &TransportError, status: Option<u16>) -> Option<u16> {
    let mut status = status;

    match error {
        TransportError::Protocol(protocol) => match protocol {
            ProtocolError::InvalidUrl { url, reason } => {
                warn!("Invalid URL: {url} - {reason}");
            }
            ProtocolError::ParameterEncodingFailed { reason } => {
                warn!("Parameter encoding failed");
                debug!("Failure reason: {reason}");
            }
            ProtocolError::MultipartEncodingFailed { reason } => {
                warn!("Multipart encoding failed");
                debug!("Failure reason: {reason}");
            }
            ProtocolError::ResponseValidationFailed { reason } => {
                warn!("Response validation failed");
                debug!("Failure reason: {reason}");

                match reason {
                    ValidationFailureReason::DataFileNil
                    | ValidationFailureReason::DataFileReadFailed => {
                        debug!("Downloaded file could not be read");
                    }
                    ValidationFailureReason::MissingContentType { acceptable } => {
                        debug!("Content type missing: {acceptable:?}");
                    }
                    ValidationFailureReason::UnacceptableContentType {
                        acceptable,
                        response,
                    } => {
                        debug!("Response content type: {response} was unacceptable: {acceptable:?}");
                    }
                    ValidationFailureReason::UnacceptableStatusCode { code } => {
                        debug!("Response status code was unacceptable: {code}");
                        status = Some(*code);
                    }
                }
            }
            ProtocolError::ResponseSerializationFailed { reason } => {
                warn!("Response serialization failed");
                debug!("Failure reason: {reason}");
            }
        },
        TransportError::Network(network) => {
            warn!("Network error: {network}");
        }
    }

    debug!("Underlying error: {error}");
    status
}
