//! Error types for the affinity service.
//!
//! The taxonomy mirrors how callers must react: `InvalidIdentifier` is
//! client-correctable, `TransientFailure` is an upstream/network problem,
//! and `Internal` indicates a programming error.

use thiserror::Error;

/// Result type alias using `AffinityError`.
pub type Result<T> = std::result::Result<T, AffinityError>;

/// Main error type for all affinity operations.
#[derive(Debug, Error)]
pub enum AffinityError {
    /// The upstream rejected the identifier's format or existence.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Network or decoding failure talking to the upstream provider.
    #[error("Upstream fetch failed: {0}")]
    TransientFailure(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AffinityError {
    /// Creates an `InvalidIdentifier` error for the given id.
    pub fn invalid_identifier(id: impl Into<String>) -> Self {
        AffinityError::InvalidIdentifier(id.into())
    }

    /// Creates a `TransientFailure` with the given reason.
    pub fn transient(reason: impl Into<String>) -> Self {
        AffinityError::TransientFailure(reason.into())
    }

    /// Returns true if the caller supplied a bad identifier (4xx-class).
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, AffinityError::InvalidIdentifier(_))
    }

    /// Returns true if this error is transient (can retry, 5xx-class).
    pub fn is_transient(&self) -> bool {
        matches!(self, AffinityError::TransientFailure(_))
    }
}
