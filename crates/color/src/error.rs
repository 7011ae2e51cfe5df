//! Color Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A color extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for color operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bytes are not a well-formed image, or the pixel buffer does not
    /// match its declared dimensions.
    #[display("decode error: {_0}")]
    Decode(#[error(not(source))] String),
    /// An extraction policy name was not recognised.
    #[display("unknown extraction policy: {_0}")]
    UnknownPolicy(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Pixels don't change between attempts.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::Decode("truncated".to_string()).to_string(), "decode error: truncated");
        assert_eq!(ErrorKind::UnknownPolicy("median".to_string()).to_string(), "unknown extraction policy: median");
        assert!(!ErrorKind::Decode(String::new()).is_retryable());
    }
}
