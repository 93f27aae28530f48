use reqwest::StatusCode;
use thiserror::Error;

use crate::location::Unavailable;

/// Failure of a single forecast fetch.
///
/// Every variant is terminal for that fetch only; the session keeps the
/// error until the next fetch replaces it. `Display` yields the text shown
/// to the user, so callers can branch on the kind without losing the
/// human-readable rendering.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("forecast request failed with status {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// The response body could not be decoded into a forecast.
    #[error("malformed forecast response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The location resolver produced no usable coordinate.
    #[error("Location not available")]
    Location(#[from] Unavailable),

    /// The caller supplied a coordinate outside the valid ranges.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl FetchError {
    /// True when the server rejected the request as unauthorized,
    /// which for this API means a missing or bad API key.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, FetchError::Http { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}
