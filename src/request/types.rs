//! Request descriptor
//!
//! A transport-agnostic description of one API call.

use crate::types::Method;
use serde_json::Value;
use url::Url;

/// Method, URL, query, headers and body for one request
///
/// Query parameters and headers keep insertion order and may repeat
/// (the library endpoint takes `ids[songs]` once per id).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// URL without query string
    pub url: String,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Create a descriptor
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create a GET descriptor
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST descriptor
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// First value of a header (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// First value of a query parameter
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value of a repeated query parameter
    pub fn query_values(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Full URL with the form-encoded query string
    ///
    /// Spaces in values become `+`.
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        if self.query.is_empty() {
            Url::parse(&self.url)
        } else {
            Url::parse_with_params(&self.url, &self.query)
        }
    }
}
