//! # Request ID Tracking
//!
//! Request identifiers carried in the `x-request-id` header and recorded on
//! the request's tracing span. Uses CUID2 for collision-resistant, URL-safe identifiers.

use std::str::FromStr;

/// Header carrying the request ID in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MIN_LEN: usize = 20;
const MAX_LEN: usize = 64;

/// A request ID type using CUID2.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID using CUID2.
    #[inline]
    pub fn new() -> Self { Self(cuid2::cuid()) }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    pub fn into_string(self) -> String { self.0 }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl FromStr for RequestId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_from_header(s).ok_or_else(|| "Invalid request ID format".to_string())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Try to accept a client-supplied request ID from a header value.
///
/// Only URL-safe values of reasonable length are accepted so that arbitrary
/// client input never ends up verbatim in logs.
pub fn try_from_header(value: &str) -> Option<RequestId> {
    let value = value.trim();
    if (MIN_LEN ..= MAX_LEN).contains(&value.len()) &&
        value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Some(RequestId(value.to_string()))
    }
    else {
        None
    }
}

/// Reuse the incoming header value when valid, otherwise generate a fresh ID.
pub fn from_header_or_new(value: Option<&str>) -> RequestId {
    value.and_then(try_from_header).unwrap_or_default()
}
