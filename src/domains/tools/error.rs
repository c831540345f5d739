//! Tool-specific error types.

use std::time::Duration;

use thiserror::Error;

use crate::domains::generation::GenerationError;
use crate::domains::remote::AdapterError;

/// Errors that can occur while registering or invoking tools.
///
/// Everything except [`ToolError::DuplicateTool`] is contained at the
/// invocation boundary and reported to the caller as an error result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Two tools were registered under the same name.
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    /// A required argument is missing or an argument is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport, authentication or remote-service failure.
    #[error("{0}")]
    RemoteCall(String),

    /// The remote reply did not have the expected shape.
    #[error("{0}")]
    MalformedResponse(String),

    /// Inline image data could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The invocation ran past its deadline.
    #[error("Tool execution timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Process configuration required by the tool is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn duplicate_tool(name: impl Into<String>) -> Self {
        Self::DuplicateTool(name.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<AdapterError> for ToolError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::MalformedResponse { .. } => Self::MalformedResponse(err.to_string()),
            AdapterError::RemoteCall { .. } | AdapterError::NotConfigured(_) => {
                Self::RemoteCall(err.to_string())
            }
        }
    }
}

impl From<GenerationError> for ToolError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::EmptyPrompt | GenerationError::ImageCount { .. } => {
                Self::InvalidArgument(err.to_string())
            }
            GenerationError::EmptyOverlayReference | GenerationError::InvalidOverlayWeight(_) => {
                Self::Configuration(err.to_string())
            }
            GenerationError::Decode(msg) => Self::Decode(msg),
            GenerationError::UnsupportedReference(_) => Self::MalformedResponse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_errors_keep_their_message() {
        let err: ToolError = AdapterError::remote("image generation", "HTTP 500").into();
        assert_eq!(err, ToolError::RemoteCall("image generation request failed: HTTP 500".into()));

        let err: ToolError = AdapterError::NotConfigured("FAL_KEY").into();
        assert_eq!(err.to_string(), "FAL_KEY is not configured");

        let err: ToolError = AdapterError::malformed("chat completion", "no content").into();
        assert!(matches!(err, ToolError::MalformedResponse(_)));
    }

    #[test]
    fn test_generation_errors_map_to_taxonomy() {
        let err: ToolError = GenerationError::Decode("Invalid byte 64".into()).into();
        assert_eq!(err.to_string(), "Failed to decode image: Invalid byte 64");

        let err: ToolError = GenerationError::ImageCount { got: 9, max: 4 }.into();
        assert!(matches!(err, ToolError::InvalidArgument(_)));

        let err: ToolError = GenerationError::EmptyOverlayReference.into();
        assert!(matches!(err, ToolError::Configuration(_)));
    }

    #[test]
    fn test_timeout_message() {
        let err = ToolError::Timeout(Duration::from_secs(120));
        assert_eq!(err.to_string(), "Tool execution timed out after 120s");
    }
}
