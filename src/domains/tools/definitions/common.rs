//! Helpers shared by tool definitions.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domains::tools::ToolError;

/// Deserialize prepared arguments into a tool's parameter struct.
pub fn parse_params<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| ToolError::invalid_argument(e.to_string()))
}
