//! Typed errors for the classifier library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while building a classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A configured pattern failed to compile.
    #[error("invalid pattern {label:?}: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
