//! Prompt service implementation.
//!
//! Holds the published prompt definitions and renders them on request.

use std::collections::HashMap;

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use tracing::info;

use super::definitions::{PromptDefinition, all_prompts};
use super::error::PromptError;

/// Service for listing and rendering prompts.
pub struct PromptService {
    prompts: Vec<Box<dyn PromptDefinition>>,
}

impl PromptService {
    pub fn new() -> Self {
        let prompts = all_prompts();
        info!("Initializing PromptService with {} prompt(s)", prompts.len());
        Self { prompts }
    }

    /// Get the list of all prompt names.
    pub fn prompt_names(&self) -> Vec<&'static str> {
        self.prompts.iter().map(|p| p.name()).collect()
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts.iter().map(|p| p.to_prompt()).collect()
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let prompt = self
            .prompts
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();
        for arg in prompt.arguments() {
            if arg.required.unwrap_or(false) && !arguments.contains_key(&arg.name) {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        let content = prompt.render(&arguments)?;
        Ok(GetPromptResult {
            description: Some(prompt.description().to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}
