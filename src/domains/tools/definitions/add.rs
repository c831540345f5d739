//! Integer addition tool.

use async_trait::async_trait;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::common::parse_params;
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler, ToolPayload};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    #[schemars(description = "First addend")]
    pub a: i64,

    #[schemars(description = "Second addend")]
    pub b: i64,
}

/// Adds two integers. Runs locally.
pub struct AddTool;

impl AddTool {
    pub const NAME: &'static str = "add";

    pub const DESCRIPTION: &'static str = "Add two integers and return the sum.";

    pub fn execute(params: &AddParams) -> Result<i64, ToolError> {
        params
            .a
            .checked_add(params.b)
            .ok_or_else(|| ToolError::invalid_argument(format!("{} + {} overflows", params.a, params.b)))
    }
}

#[async_trait]
impl ToolHandler for AddTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::for_params::<AddParams>(Self::NAME, Self::DESCRIPTION)
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: JsonObject) -> Result<ToolPayload, ToolError> {
        let params: AddParams = parse_params(arguments)?;
        info!("Add tool called: {} + {}", params.a, params.b);
        Ok(ToolPayload::Json(json!(Self::execute(&params)?)))
    }
}
