//! Continuation offset extraction
//!
//! The server's `next` field is a path such as
//! `/v1/me/library/songs?offset=100`; the offset to request next is the
//! last run of two or more digits in it.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Pattern matching the embedded offset
pub const DEFAULT_OFFSET_PATTERN: &str = r"(\d{2,})";

static DEFAULT_EXTRACTOR: LazyLock<std::result::Result<OffsetExtractor, regex::Error>> =
    LazyLock::new(|| OffsetExtractor::new(DEFAULT_OFFSET_PATTERN));

/// Extracts the continuation offset from a `next` field
#[derive(Debug, Clone)]
pub struct OffsetExtractor {
    regex: Regex,
}

impl OffsetExtractor {
    /// Compile an extractor for `pattern`
    pub fn new(pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// The pattern this extractor applies
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Last match in `next`, or an empty string when there is none
    pub fn extract(&self, next: Option<&str>) -> String {
        next.and_then(|text| self.regex.find_iter(text).last())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

/// Extract the offset from `next` with the default pattern
pub fn extract_offset(next: Option<&str>) -> Result<String> {
    DEFAULT_EXTRACTOR
        .as_ref()
        .map(|extractor| extractor.extract(next))
        .map_err(|e| Error::Pattern(e.clone()))
}

/// Last match of `pattern` in `text`
///
/// Unlike [`OffsetExtractor::extract`], finding nothing is an error: the
/// response the text came from is considered corrupted.
pub fn regex_search(pattern: &str, text: &str) -> Result<String> {
    let regex = Regex::new(pattern)?;
    regex
        .find_iter(text)
        .last()
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::corrupted(format!("no match for {pattern} in {text:?}")))
}
