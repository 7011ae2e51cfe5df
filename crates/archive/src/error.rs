//! Archive Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Archive file does not exist
    #[display("archive not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// The file exists but is not a readable archive.
    #[display("invalid archive: {}", _0.display())]
    InvalidArchive(#[error(not(source))] PathBuf),
    /// Underlying I/O error while opening the archive
    #[display("I/O error: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// No entry exists at the index.
    #[display("no archive entry at index {_0}")]
    OutOfRange(#[error(not(source))] usize),
    /// A single entry could not be read or decompressed; other entries may
    /// still be fine.
    #[display("unreadable archive entry: {_0}")]
    Entry(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::NotFound(PathBuf::from("items.zip")).to_string(), "archive not found: items.zip");
        assert_eq!(ErrorKind::Entry("1-0.png".to_string()).to_string(), "unreadable archive entry: 1-0.png");
        assert!(ErrorKind::Io(PathBuf::new()).is_retryable());
        assert!(!ErrorKind::InvalidArchive(PathBuf::new()).is_retryable());
    }
}
