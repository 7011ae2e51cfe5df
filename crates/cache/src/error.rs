//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Text is not of the form `<id>` or `<id>-<meta>`.
    #[display("invalid asset key: {_0:?}")]
    InvalidKey(#[error(not(source))] String),
    /// The snapshot document is malformed. Callers are expected to fall back
    /// to an empty cache.
    #[display("malformed cache snapshot")]
    Parse,
    /// The store could not be serialized.
    #[display("could not encode cache snapshot")]
    Encode,
    /// No snapshot exists at the path yet.
    #[display("cache snapshot not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Reading or replacing the snapshot file failed.
    #[display("I/O error on cache snapshot: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
