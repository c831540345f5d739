//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResourceError {
    /// No resource or template matches the URI.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The URI matches a template but its parameters are unusable.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "invalid URI" error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri(uri.into())
    }
}
