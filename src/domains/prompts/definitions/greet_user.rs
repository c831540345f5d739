//! Greeting prompt definition.

use std::collections::HashMap;

use rmcp::model::PromptArgument;

use super::PromptDefinition;
use crate::domains::prompts::PromptError;

/// Tone of the requested greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreetStyle {
    #[default]
    Friendly,
    Formal,
    Casual,
}

impl GreetStyle {
    /// Unknown styles fall back to [`GreetStyle::Friendly`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "formal" => Self::Formal,
            "casual" => Self::Casual,
            _ => Self::Friendly,
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::Friendly => "Please write a warm, friendly greeting",
            Self::Formal => "Please write a formal, professional greeting",
            Self::Casual => "Please write a casual, relaxed greeting",
        }
    }
}

/// Asks the model to greet someone in a given style.
pub struct GreetUserPrompt;

impl GreetUserPrompt {
    pub const NAME: &'static str = "greet_user";
}

impl PromptDefinition for GreetUserPrompt {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Generate a greeting prompt"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "name".to_string(),
                title: None,
                description: Some("The name to greet".to_string()),
                required: Some(true),
            },
            PromptArgument {
                name: "style".to_string(),
                title: None,
                description: Some("The greeting style: friendly, formal, or casual".to_string()),
                required: Some(false),
            },
        ]
    }

    fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let name = arguments
            .get("name")
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| PromptError::invalid_argument("name", "must not be empty"))?;
        let style = arguments
            .get("style")
            .map(|s| GreetStyle::parse(s))
            .unwrap_or_default();

        Ok(format!("{} for someone named {}.", style.instruction(), name))
    }
}
