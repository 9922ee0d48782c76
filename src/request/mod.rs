//! Request module
//!
//! Builds the descriptor for each Apple Music endpoint.
//!
//! # Overview
//!
//! - [`RequestDescriptor`] - method, URL, query, headers and body of one call
//! - [`RequestFactory`] - one builder per endpoint, applying credentials
//!
//! Library listings are paged with `limit=100` (the server maximum) and an
//! `offset` continuation cursor.

mod factory;
mod types;

pub use factory::{
    LibraryAdditions, RequestFactory, DEFAULT_BASE_URL, LIBRARY_PAGE_LIMIT, SEARCH_LIMIT,
    SEARCH_TYPES,
};
pub use types::RequestDescriptor;
