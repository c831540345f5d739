//! Prompt improvement tool.
//!
//! Rewrites a user's request into a detailed image-model prompt with the
//! chat model. The overlay's trigger token travels in the user message, not
//! the system instruction, so the model reliably carries it into the result.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::common::parse_params;
use crate::domains::remote::ChatAdapter;
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler, ToolPayload};

const SYSTEM_PROMPT: &str = r#"You write prompts for the FLUX.1 text-to-image model.

You receive a trigger word and a user request. The trigger word activates a
LoRA fine-tuned on one specific subject; the prompt you write must use it
verbatim to refer to that subject. Reply with a JSON object whose only key is
"prompt".

How FLUX.1 reads prompts:
- It follows plain natural-language sentences. Be concrete and specific.
- Describe mood, style, colour palette and point of view, not only the objects.
- For photographic looks, name the camera or phone, lens, aperture and framing.
- Build the scene in depth: say what is in the foreground, then the middle
  ground, then the background.
- When two looks share one frame (day and night, summer and winter), say where
  each one applies and how the boundary between them looks.
- For glass, ice, water or other see-through materials, state what is in front
  and what can be seen through it.
- Text inside the image is rendered legibly when you give the exact words plus
  font, size, colour, placement and effects such as glow or outline.

Example: "In the foreground, Esteban leans on a red vintage scooter on a wet
cobblestone street. Behind him, a night market glows under strings of warm
bulbs. In the background, a hilltop castle fades into mist. Shot on a 35mm
lens at f/1.8, shallow depth of field.""#;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ImprovePromptParams {
    #[schemars(description = "The image the user is asking for, in their own words")]
    pub user_query: String,
}

pub struct ImprovePromptTool {
    chat: Arc<dyn ChatAdapter>,
    trigger_word: String,
}

impl ImprovePromptTool {
    pub const NAME: &'static str = "improve_prompt";

    pub const DESCRIPTION: &'static str = "Turn a short image request into a detailed FLUX.1 prompt. \
        The result always names the configured subject through its LoRA trigger word. \
        Pass the result to generate_image.";

    pub fn new(chat: Arc<dyn ChatAdapter>, trigger_word: impl Into<String>) -> Self {
        Self {
            chat,
            trigger_word: trigger_word.into(),
        }
    }

    fn user_message(&self, user_query: &str) -> String {
        format!("trigger_word: {}\nquery: {}", self.trigger_word, user_query)
    }
}

#[async_trait]
impl ToolHandler for ImprovePromptTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::for_params::<ImprovePromptParams>(Self::NAME, Self::DESCRIPTION)
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: JsonObject) -> Result<ToolPayload, ToolError> {
        let params: ImprovePromptParams = parse_params(arguments)?;
        info!("Prompt improvement called ({} chars)", params.user_query.len());

        let suggestion = self
            .chat
            .complete(SYSTEM_PROMPT, &self.user_message(&params.user_query))
            .await?;
        debug!(len = suggestion.prompt.len(), "Prompt improved");
        Ok(ToolPayload::Text(suggestion.prompt))
    }
}
