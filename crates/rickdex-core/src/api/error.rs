//! Errors raised by the remote character source

use thiserror::Error;

/// A failed page fetch.
///
/// Every variant renders as a message fit for direct display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure (DNS, TLS, timeout, connection reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("API Error: {code} - {message}")]
    Status { code: u16, message: String },

    /// Server answered successfully with no body
    #[error("API Error: Empty Response Body")]
    EmptyBody,

    /// Body was not a listing response
    #[error("API Error: unexpected response body: {0}")]
    Decode(String),

    /// `next` URL did not end in a page number
    #[error("API Error: invalid next page link: {0}")]
    InvalidCursor(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
