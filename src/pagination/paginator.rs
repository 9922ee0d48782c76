//! Paginator state machine
//!
//! One [`Paginator`] owns one run: its offset, its accumulator and its
//! cancellation channel. Pages are fetched strictly one after another.

use super::merge::{item_count, merge_page};
use super::offset::OffsetExtractor;
use super::types::{
    CancelHandle, MergePolicy, PageResult, PaginationError, PaginationFailure, PaginationState,
    PaginatorConfig,
};
use crate::decode::{decode_response, FetchOutcome};
use crate::http::Transport;
use crate::request::RequestDescriptor;
use futures::Stream;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Builds the request for a given offset
pub type RequestBuilder = Box<dyn Fn(&str) -> RequestDescriptor + Send + Sync>;

/// Drives a paginated listing to completion
///
/// ```text
/// Continuing("0") -> Continuing(next) -> ... -> Done | Failed
/// ```
///
/// Each call to [`next_page`](Self::next_page) fetches, decodes and merges
/// one page. Once the run is done or failed it yields `None`.
pub struct Paginator {
    transport: Arc<dyn Transport>,
    build_request: RequestBuilder,
    extractor: OffsetExtractor,
    merge_policy: MergePolicy,
    state: PaginationState,
    accumulator: Value,
    pages: usize,
    cancel: CancelHandle,
    cancelled: watch::Receiver<bool>,
}

impl Paginator {
    /// Create a paginator
    ///
    /// Fails with [`PaginationFailure::Pattern`] when the configured offset
    /// pattern does not compile; no request has been issued at that point.
    pub fn new<F>(
        transport: Arc<dyn Transport>,
        config: &PaginatorConfig,
        build_request: F,
    ) -> Result<Self, PaginationError>
    where
        F: Fn(&str) -> RequestDescriptor + Send + Sync + 'static,
    {
        let extractor = OffsetExtractor::new(&config.offset_pattern).map_err(|e| {
            PaginationError::new(PaginationFailure::Pattern(e), Value::Array(Vec::new()), 0)
        })?;
        let (cancel, cancelled) = CancelHandle::new();

        Ok(Self {
            transport,
            build_request: Box::new(build_request),
            extractor,
            merge_policy: config.merge_policy,
            state: PaginationState::initial(),
            accumulator: Value::Array(Vec::new()),
            pages: 0,
            cancel,
            cancelled,
        })
    }

    /// Handle that cancels this run
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Current state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Offset of the next request, while the run continues
    pub fn current_offset(&self) -> Option<&str> {
        self.state.offset()
    }

    /// Check if the run has stopped
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Accumulated result so far
    pub fn accumulator(&self) -> &Value {
        &self.accumulator
    }

    /// Take the accumulated result
    pub fn into_accumulator(self) -> Value {
        self.accumulator
    }

    /// Fetch, decode and merge the next page
    ///
    /// Returns `None` once the run is done or has failed.
    pub async fn next_page(&mut self) -> Option<Result<PageResult, PaginationError>> {
        let offset = self.state.offset()?.to_string();

        if *self.cancelled.borrow() {
            return Some(Err(self.cancelled_error()));
        }

        let request = (self.build_request)(&offset);
        let index = self.pages + 1;
        debug!("Fetching page {index} at offset {offset:?}");

        let transport = Arc::clone(&self.transport);
        let mut cancelled = self.cancelled.clone();
        let response = tokio::select! {
            biased;
            Ok(_) = cancelled.wait_for(|cancelled| *cancelled) => None,
            response = transport.execute(&request) => Some(response),
        };
        let Some(response) = response else {
            return Some(Err(self.cancelled_error()));
        };

        let payload = match decode_response(response) {
            FetchOutcome::Success(payload) => payload,
            FetchOutcome::Failure(cause) => {
                warn!("Page {index} failed, stopping pagination");
                return Some(Err(self.fail(PaginationFailure::Fetch(cause))));
            }
        };
        self.pages = index;

        let partial_data = payload.get("data").cloned().unwrap_or(Value::Null);
        let (next_offset, is_finished) = match payload.get("next") {
            None | Some(Value::Null) => (String::new(), true),
            Some(Value::String(next)) => (self.extractor.extract(Some(next)), false),
            Some(other) => {
                warn!("Unexpected `next` value {other}, treating page {index} as the last");
                (String::new(), true)
            }
        };

        let merged = match self.merge(index, partial_data.clone()) {
            Ok(merged) => merged,
            Err(error) => return Some(Err(error)),
        };

        self.state = if is_finished {
            info!(
                "Pagination finished after {} page(s), {} item(s)",
                self.pages,
                item_count(&self.accumulator)
            );
            PaginationState::Done
        } else {
            if next_offset.is_empty() {
                warn!("No offset found in `next` of page {index}, continuing with an empty offset");
            }
            if next_offset == offset {
                warn!("Page {index} points back at offset {offset:?}, the server may repeat it");
            }
            PaginationState::Continuing {
                offset: next_offset.clone(),
            }
        };

        Some(Ok(PageResult {
            index,
            offset,
            partial_data,
            next_offset,
            is_finished,
            merged,
        }))
    }

    /// Drive the run to completion
    pub async fn collect(mut self) -> Result<Value, PaginationError> {
        while let Some(page) = self.next_page().await {
            page?;
        }
        Ok(self.accumulator)
    }

    /// Expose the run as a stream of pages
    ///
    /// The stream ends after the last page or right after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<PageResult, PaginationError>> + Send {
        futures::stream::unfold(self, |mut paginator| async move {
            paginator
                .next_page()
                .await
                .map(|page| (page, paginator))
        })
    }

    /// Merge one page's data; `Ok(false)` when a lenient merge dropped it
    fn merge(&mut self, index: usize, data: Value) -> Result<bool, PaginationError> {
        if data.is_null() {
            debug!("Page {index} carries no data");
            return Ok(false);
        }

        let count = item_count(&data);
        match merge_page(&mut self.accumulator, data) {
            Ok(()) => {
                debug!("Merged {count} item(s) from page {index}");
                Ok(true)
            }
            Err(source) => match self.merge_policy {
                MergePolicy::Strict => {
                    Err(self.fail(PaginationFailure::Merge { page: index, source }))
                }
                MergePolicy::Lenient => {
                    warn!("Dropping page {index}: {source}");
                    Ok(false)
                }
            },
        }
    }

    fn cancelled_error(&mut self) -> PaginationError {
        info!("Pagination cancelled after {} page(s)", self.pages);
        self.fail(PaginationFailure::Cancelled)
    }

    fn fail(&mut self, cause: PaginationFailure) -> PaginationError {
        self.state = PaginationState::Failed;
        PaginationError::new(cause, self.accumulator.clone(), self.pages)
    }
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("state", &self.state)
            .field("pages", &self.pages)
            .field("merge_policy", &self.merge_policy)
            .field("offset_pattern", &self.extractor.pattern())
            .finish_non_exhaustive()
    }
}
