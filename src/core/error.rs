//! Error types and handling for the MCP server.
//!
//! Tool failures are contained at the invocation boundary and reported to the
//! client as results. This type covers what can still fail while the server
//! is being assembled at startup.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Startup error for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain (e.g. a duplicate registration).
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_duplicate_tool_converts_into_startup_error() {
        let err: Error = ToolError::duplicate_tool("generate_image").into();
        assert!(matches!(err, Error::Tool(ToolError::DuplicateTool(_))));
        assert!(err.to_string().contains("generate_image"));
    }

    #[test]
    fn test_config_error_message() {
        let err = Error::config("Failed to build HTTP client: no TLS backend");
        assert_eq!(
            err.to_string(),
            "Configuration error: Failed to build HTTP client: no TLS backend"
        );
    }
}
