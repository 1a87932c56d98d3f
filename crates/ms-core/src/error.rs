//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`, so `?` works across the crate boundary.

use thiserror::Error;

use crate::Point;

/// The error type for `ms-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed point {0}: coordinates must be finite")]
    MalformedPoint(Point),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ms-core`.
pub type CoreResult<T> = Result<T, CoreError>;
