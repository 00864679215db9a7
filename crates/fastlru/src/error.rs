//! Error types for fastlru

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cache holds no entries
    Empty,

    /// The cache is non-empty but the key is not present
    NotFound,

    /// Internal invariant violation; indicates a bug in the engine and
    /// never occurs in correct operation
    Unknown,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "cache is empty"),
            Error::NotFound => write!(f, "key not found"),
            Error::Unknown => write!(f, "internal cache invariant violated"),
        }
    }
}

impl std::error::Error for Error {}
