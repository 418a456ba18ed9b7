//! Error type definitions
//!
//! The extraction core never aborts a run: malformed rows degrade to
//! rejections, not errors. This type exists for input-shape diagnostics
//! surfaced to embedding services.

use thiserror::Error;

/// Library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
