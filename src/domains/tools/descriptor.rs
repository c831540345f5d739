//! Tool metadata and argument preparation.
//!
//! A tool's parameters are declared once, as a `*Params` struct deriving
//! [`JsonSchema`]. The published MCP input schema is generated from that
//! struct, and the [`ParameterSpec`] list the registry validates against is
//! read back out of the same schema, so the two cannot disagree.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde_json::Value;

use super::error::ToolError;

/// One declared tool parameter, as published in the input schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub required: bool,
    pub default: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl ParameterSpec {
    fn from_schema(name: &str, property: &Value, required: bool) -> Self {
        Self {
            name: name.to_string(),
            required,
            default: property.get("default").cloned(),
            minimum: property.get("minimum").and_then(Value::as_f64),
            maximum: property.get("maximum").and_then(Value::as_f64),
        }
    }

    fn check_bounds(&self, value: &Value) -> Result<(), ToolError> {
        let Some(number) = value.as_f64() else {
            return Ok(());
        };
        let below = self.minimum.is_some_and(|min| number < min);
        let above = self.maximum.is_some_and(|max| number > max);
        if below || above {
            return Err(ToolError::invalid_argument(format!(
                "'{}' must be {} (got {})",
                self.name,
                self.range_text(),
                value
            )));
        }
        Ok(())
    }

    fn range_text(&self) -> String {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) => format!("between {} and {}", min, max),
            (Some(min), None) => format!("at least {}", min),
            (None, Some(max)) => format!("at most {}", max),
            (None, None) => "in range".to_string(),
        }
    }
}

/// Name, description and input schema of a tool. Immutable once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
    input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    /// Describe a tool whose arguments deserialize into `P`.
    pub fn for_params<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Self {
        let input_schema = cached_schema_for_type::<P>();

        let required: Vec<&str> = input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let parameters = input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, property)| {
                        ParameterSpec::from_schema(name, property, required.contains(&name.as_str()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name,
            description,
            parameters,
            input_schema,
        }
    }

    /// The JSON Schema object published for this tool's arguments.
    pub fn input_schema(&self) -> &JsonObject {
        &self.input_schema
    }

    /// Create a Tool model for this descriptor (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Check arguments against the parameter list and fill in defaults.
    ///
    /// A required parameter that is absent or `null` is rejected, as is a
    /// number outside its published bounds. Type mismatches surface when the
    /// handler deserializes its params struct.
    pub fn prepare_arguments(&self, mut arguments: JsonObject) -> Result<JsonObject, ToolError> {
        for param in &self.parameters {
            match arguments.get(&param.name) {
                None | Some(Value::Null) => {
                    if param.required {
                        return Err(ToolError::invalid_argument(format!(
                            "missing required argument '{}'",
                            param.name
                        )));
                    }
                    arguments.remove(&param.name);
                    if let Some(default) = &param.default {
                        arguments.insert(param.name.clone(), default.clone());
                    }
                }
                Some(value) => param.check_bounds(value)?,
            }
        }
        Ok(arguments)
    }
}
