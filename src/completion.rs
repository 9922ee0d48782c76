//! Completion triple
//!
//! Callers that want a flat `(success, error, result)` view of an outcome
//! convert into [`Completion`]. A status failure (the server answered with
//! an unsuccessful code) and a missing status both report `error: None`:
//! only transport-level failures carry an underlying error. Any failure
//! leaves `result` empty.

use crate::decode::{FailureCause, FetchOutcome};
use crate::error::Error;
use crate::pagination::{PaginationError, PaginationFailure};
use serde_json::Value;

/// Flattened outcome of a fetch or pagination run
#[derive(Debug)]
pub struct Completion {
    /// Whether the operation succeeded
    pub success: bool,
    /// Underlying error, when one exists
    pub error: Option<Error>,
    /// Result payload on success
    pub result: Option<Value>,
}

impl Completion {
    /// A successful completion
    pub fn success(result: Value) -> Self {
        Self {
            success: true,
            error: None,
            result: Some(result),
        }
    }

    /// A failed completion
    pub fn failure(error: Option<Error>) -> Self {
        Self {
            success: false,
            error,
            result: None,
        }
    }

    /// Split into the `(success, error, result)` triple
    pub fn into_parts(self) -> (bool, Option<Error>, Option<Value>) {
        (self.success, self.error, self.result)
    }
}

impl From<FailureCause> for Completion {
    fn from(cause: FailureCause) -> Self {
        Self::failure(cause.underlying_error().map(Error::Transport))
    }
}

impl From<FetchOutcome> for Completion {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success(value) => Self::success(value),
            FetchOutcome::Failure(cause) => cause.into(),
        }
    }
}

impl From<Result<Value, PaginationError>> for Completion {
    fn from(result: Result<Value, PaginationError>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => match error.cause {
                PaginationFailure::Fetch(cause) => cause.into(),
                other => Self::failure(Some(other.into())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::classify_status;
    use crate::http::{NetworkError, NetworkErrorKind};
    use crate::pagination::MergeError;
    use serde_json::json;

    #[test]
    fn test_success() {
        let (success, error, result) =
            Completion::from(FetchOutcome::Success(json!({"data": []}))).into_parts();
        assert!(success);
        assert!(error.is_none());
        assert_eq!(result, Some(json!({"data": []})));
    }

    #[test]
    fn test_status_failure_has_no_error() {
        let cause = FailureCause::Status {
            code: 404,
            outcome: classify_status(404),
        };
        let completion = Completion::from(FetchOutcome::Failure(cause));
        assert!(!completion.success);
        assert!(completion.error.is_none());
        assert!(completion.result.is_none());
    }

    #[test]
    fn test_unknown_failure_has_no_error() {
        let completion = Completion::from(FetchOutcome::Failure(FailureCause::Unknown));
        assert!(!completion.success);
        assert!(completion.error.is_none());
    }

    #[test]
    fn test_transport_failure_carries_error() {
        let cause = FailureCause::Transport {
            error: NetworkError::new(NetworkErrorKind::Offline, "offline"),
            status: None,
        };
        let completion = Completion::from(FetchOutcome::Failure(cause));
        assert!(!completion.success);
        assert!(matches!(completion.error, Some(Error::Transport(_))));
    }

    #[test]
    fn test_pagination_results() {
        let ok = Completion::from(Ok::<_, PaginationError>(json!([1, 2])));
        assert!(ok.success);
        assert_eq!(ok.result, Some(json!([1, 2])));

        let merge = PaginationError::new(
            PaginationFailure::Merge {
                page: 2,
                source: MergeError::TypeMismatch {
                    expected: "array",
                    found: "object",
                },
            },
            json!([1]),
            2,
        );
        let failed = Completion::from(Err::<Value, _>(merge));
        assert!(!failed.success);
        assert!(failed.result.is_none());
        assert!(matches!(failed.error, Some(Error::Merge { page: 2, .. })));

        let cancelled = Completion::from(Err::<Value, _>(PaginationError::new(
            PaginationFailure::Cancelled,
            json!([]),
            0,
        )));
        assert!(matches!(cancelled.error, Some(Error::Cancelled)));
    }
}
