//! Pagination module
//!
//! Fetch-decode-merge loop for the paginated library listings.
//!
//! # Overview
//!
//! A [`Paginator`] requests `offset=0`, decodes the response, merges its
//! `data` into an accumulator and continues from the offset embedded in the
//! `next` field until `next` is absent. The first failed page stops the
//! run; the error carries everything merged up to that point.
//!
//! - [`OffsetExtractor`] - last run of two or more digits in `next`
//! - [`merge_page`] - array concatenation, recursive object merge
//! - [`CancelHandle`] - stops a run from another task

mod merge;
mod offset;
mod paginator;
mod types;

pub use merge::{item_count, merge_page, MergeError};
pub use offset::{extract_offset, regex_search, OffsetExtractor, DEFAULT_OFFSET_PATTERN};
pub use paginator::{Paginator, RequestBuilder};
pub use types::{
    CancelHandle, MergePolicy, PageResult, PaginationError, PaginationFailure, PaginationState,
    PaginatorConfig, INITIAL_OFFSET,
};
