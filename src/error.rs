//! Error types for the pagination engine
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! A malformed cursor is a client input error and is surfaced before any
//! store traffic; store failures are propagated unchanged.

use thiserror::Error;

/// The main error type for the pagination engine
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied cursor token could not be decoded into a valid document
    /// identifier (and, for field sorts, a valid scalar value).
    #[error("Malformed cursor: {message}")]
    MalformedCursor { message: String },

    /// Any failure from the underlying collection handle. No retry or
    /// suppression happens here; retry policy belongs to the store layer.
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl Error {
    /// Create a malformed cursor error
    pub fn malformed_cursor(message: impl Into<String>) -> Self {
        Self::MalformedCursor {
            message: message.into(),
        }
    }

    /// Create a store error from a message
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(anyhow::anyhow!(message.into()))
    }

    /// Check if this error was caused by bad client input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MalformedCursor { .. })
    }
}

/// Result type alias for the pagination engine
pub type Result<T> = std::result::Result<T, Error>;
