//! Prompt definitions module.
//!
//! Each prompt lives in its own file and implements [`PromptDefinition`].

use std::collections::HashMap;

use rmcp::model::{Prompt, PromptArgument};

use super::error::PromptError;

pub mod greet_user;

pub use greet_user::{GreetStyle, GreetUserPrompt};

/// Trait for prompt definitions.
pub trait PromptDefinition: Send + Sync {
    /// The unique name of the prompt.
    fn name(&self) -> &'static str;

    /// A description of what the prompt does.
    fn description(&self) -> &'static str;

    /// The arguments this prompt accepts.
    fn arguments(&self) -> Vec<PromptArgument>;

    /// Render the user message. Required arguments are checked by the caller.
    fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError>;

    fn to_prompt(&self) -> Prompt {
        Prompt {
            name: self.name().to_string(),
            title: None,
            description: Some(self.description().to_string()),
            arguments: Some(self.arguments()),
            icons: None,
            meta: None,
        }
    }
}

/// Every prompt this server publishes.
pub fn all_prompts() -> Vec<Box<dyn PromptDefinition>> {
    vec![Box::new(GreetUserPrompt)]
}
