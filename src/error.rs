//! Crate-level error types
//!
//! Module-specific errors are defined next to the code that produces them
//! and wrapped here for callers that want a single error type.

use crate::connection::ConnectionError;

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug)]
pub enum Error {
    /// Connection-layer failure (registry unavailable, bind rejected, ...)
    Connection(ConnectionError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Connection(e) => write!(f, "Connection error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Connection(e) => Some(e),
        }
    }
}

impl From<ConnectionError> for Error {
    fn from(e: ConnectionError) -> Self {
        Error::Connection(e)
    }
}
