//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The texture archive is missing, unreadable or not an archive. Nothing
    /// can be loaded without it.
    #[display("could not open texture archive: {}", _0.display())]
    Archive(#[error(not(source))] PathBuf),
    /// The archive listed an entry whose metadata or content can't be read.
    #[display("could not read archive entry {_0:?}")]
    Read(#[error(not(source))] String),
    /// The entry content isn't a decodable image.
    #[display("could not decode image {_0:?}")]
    Decode(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Read(_))
    }
}
