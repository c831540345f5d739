//! Tool handler trait and the invocation result shape.
//!
//! Handlers return an explicit `Result`; the registry turns that into a
//! [`ToolInvocationResult`], the only value that crosses the dispatch
//! boundary.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde_json::Value;
use tracing::warn;

use super::descriptor::ToolDescriptor;
use super::error::ToolError;
use crate::domains::generation::GeneratedImage;

/// Trait implemented by every tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Metadata published to clients and used for argument validation.
    fn descriptor(&self) -> ToolDescriptor;

    /// Run the tool. Arguments have already been validated against
    /// [`ToolHandler::descriptor`] and carry defaults for absent optionals.
    async fn call(&self, arguments: JsonObject) -> Result<ToolPayload, ToolError>;
}

/// Successful tool output.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPayload {
    Json(Value),
    Text(String),
    Image(GeneratedImage),
}

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocationResult {
    Ok(ToolPayload),
    Error(ToolError),
}

impl ToolInvocationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn payload(&self) -> Option<&ToolPayload> {
        match self {
            Self::Ok(payload) => Some(payload),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ToolError> {
        match self {
            Self::Ok(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// Human-readable error text, if this is an error.
    pub fn message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    /// Convert into the MCP wire result.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Ok(ToolPayload::Json(value @ Value::Object(_))) => CallToolResult {
                content: vec![Content::text(pretty(&value))],
                structured_content: Some(value),
                is_error: Some(false),
                meta: None,
            },
            Self::Ok(ToolPayload::Json(value)) => CallToolResult::success(vec![Content::text(pretty(&value))]),
            Self::Ok(ToolPayload::Text(text)) => CallToolResult::success(vec![Content::text(text)]),
            Self::Ok(ToolPayload::Image(image)) => {
                CallToolResult::success(vec![Content::image(image.to_base64(), image.mime_type())])
            }
            Self::Error(err) => {
                warn!("Tool invocation failed: {}", err);
                CallToolResult::error(vec![Content::text(err.to_string())])
            }
        }
    }
}

impl From<Result<ToolPayload, ToolError>> for ToolInvocationResult {
    fn from(result: Result<ToolPayload, ToolError>) -> Self {
        match result {
            Ok(payload) => Self::Ok(payload),
            Err(err) => Self::Error(err),
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
