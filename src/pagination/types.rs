//! Pagination types
//!
//! State, configuration and outcome types for a pagination run.

use super::merge::MergeError;
use super::offset::DEFAULT_OFFSET_PATTERN;
use crate::decode::FailureCause;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Offset of the first page
pub const INITIAL_OFFSET: &str = "0";

/// One fetched page, as seen by the paginator
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// 1-based page number within the run
    pub index: usize,
    /// Offset this page was requested with
    pub offset: String,
    /// The page's `data` field
    pub partial_data: Value,
    /// Offset extracted from `next` (empty when finished or unmatched)
    pub next_offset: String,
    /// Whether the server signalled the last page
    pub is_finished: bool,
    /// Whether the page made it into the accumulator
    pub merged: bool,
}

/// Where a pagination run stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationState {
    /// Next request uses this offset
    Continuing { offset: String },
    /// Last page merged
    Done,
    /// Stopped on a failure
    Failed,
}

impl PaginationState {
    /// Initial state of every run
    pub fn initial() -> Self {
        Self::Continuing {
            offset: INITIAL_OFFSET.to_string(),
        }
    }

    /// Check if the run has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continuing { .. })
    }

    /// Offset of the next request, while continuing
    pub fn offset(&self) -> Option<&str> {
        match self {
            Self::Continuing { offset } => Some(offset),
            Self::Done | Self::Failed => None,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::initial()
    }
}

/// What to do when a page cannot be merged into the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Stop the run with a merge failure
    #[default]
    Strict,
    /// Log, drop the page and keep paginating
    Lenient,
}

/// Configuration for pagination runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorConfig {
    /// Merge failure handling
    #[serde(default)]
    pub merge_policy: MergePolicy,
    /// Pattern locating the offset inside `next`
    #[serde(default = "default_offset_pattern")]
    pub offset_pattern: String,
}

fn default_offset_pattern() -> String {
    DEFAULT_OFFSET_PATTERN.to_string()
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::default(),
            offset_pattern: default_offset_pattern(),
        }
    }
}

impl PaginatorConfig {
    /// Set the merge policy
    #[must_use]
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Set the offset pattern
    #[must_use]
    pub fn with_offset_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.offset_pattern = pattern.into();
        self
    }
}

// ============================================================================
// Failures
// ============================================================================

/// Why a pagination run stopped early
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaginationFailure {
    /// A page request failed
    #[error("page fetch failed: {}", describe_cause(.0))]
    Fetch(FailureCause),

    /// A page could not be merged (strict policy only)
    #[error("page {page} could not be merged: {source}")]
    Merge { page: usize, source: MergeError },

    /// The offset pattern did not compile
    #[error("invalid offset pattern: {0}")]
    Pattern(regex::Error),

    /// The run was cancelled
    #[error("pagination cancelled")]
    Cancelled,
}

fn describe_cause(cause: &FailureCause) -> String {
    match cause {
        FailureCause::Encoding { error, .. } => error.to_string(),
        FailureCause::Transport { error, .. } => error.to_string(),
        FailureCause::Status { code, outcome } => format!("HTTP {code} {}", outcome.code_name),
        FailureCause::Unknown => "no HTTP status code".to_string(),
    }
}

/// A failed pagination run, with everything merged before the failure
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{cause} after {pages} page(s)")]
pub struct PaginationError {
    /// Why the run stopped
    pub cause: PaginationFailure,
    /// Accumulator as of the last merged page
    pub partial: Value,
    /// Pages fetched successfully before the failure
    pub pages: usize,
}

impl PaginationError {
    /// Create a pagination error
    pub fn new(cause: PaginationFailure, partial: Value, pages: usize) -> Self {
        Self {
            cause,
            partial,
            pages,
        }
    }

    /// Check if the run was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self.cause, PaginationFailure::Cancelled)
    }

    /// The fetch failure cause, if a request failed
    pub fn fetch_cause(&self) -> Option<&FailureCause> {
        match &self.cause {
            PaginationFailure::Fetch(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<PaginationFailure> for crate::Error {
    fn from(failure: PaginationFailure) -> Self {
        match failure {
            PaginationFailure::Fetch(cause) => cause.into(),
            PaginationFailure::Merge { page, source } => Self::merge(page, source.to_string()),
            PaginationFailure::Pattern(e) => Self::Pattern(e),
            PaginationFailure::Cancelled => Self::Cancelled,
        }
    }
}

impl From<PaginationError> for crate::Error {
    fn from(error: PaginationError) -> Self {
        error.cause.into()
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Cancels a pagination run from anywhere
///
/// Cloneable and `Send`; cancelling is idempotent.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub(crate) fn new() -> (Self, watch::Receiver<bool>) {
        let (sender, receiver) = watch::channel(false);
        (
            Self {
                sender: Arc::new(sender),
            },
            receiver,
        )
    }

    /// Stop the run: no further page is requested, an in-flight one is abandoned
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}
