//! Error types for the Naver shop-search client.

use thiserror::Error;

/// Errors returned by [`crate::NaverShopClient`].
#[derive(Debug, Error)]
pub enum NaverError {
    /// Transport-level failure: connect, timeout, body read, JSON decode.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the search endpoint.
    #[error("naver api error (status {status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, NaverError>;
