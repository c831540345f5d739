//! Chat-completion adapter with a strictly typed reply.

use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::azure_openai::AzureOpenAiAccess;
use super::error::{AdapterError, AdapterResult};

const SERVICE: &str = "chat completion";

/// The only reply shape the chat model is allowed to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PromptSuggestion {
    /// The rewritten image-generation prompt.
    pub prompt: String,
}

impl PromptSuggestion {
    /// Parse a raw model reply.
    pub fn parse(raw: &str) -> AdapterResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            AdapterError::malformed(SERVICE, format!("{} (reply: {})", e, raw))
        })
    }

    /// JSON schema sent as the strict response format.
    fn response_format() -> AdapterResult<ResponseFormat> {
        let mut schema = serde_json::to_value(schemars::schema_for!(PromptSuggestion))
            .map_err(|e| AdapterError::malformed(SERVICE, e.to_string()))?;
        if let Some(object) = schema.as_object_mut() {
            object.remove("$schema");
        }

        Ok(ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: "prompt_suggestion".to_string(),
                schema: Some(schema),
                strict: Some(true),
            },
        })
    }
}

/// Sends one system + user exchange and reads back a [`PromptSuggestion`].
#[async_trait]
pub trait ChatAdapter: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> AdapterResult<PromptSuggestion>;
}

/// Chat adapter backed by an Azure OpenAI chat deployment.
pub struct AzureChatAdapter {
    access: AzureOpenAiAccess,
    deployment: String,
    temperature: f32,
}

impl AzureChatAdapter {
    pub fn new(access: AzureOpenAiAccess, deployment: impl Into<String>, temperature: f32) -> Self {
        Self {
            access,
            deployment: deployment.into(),
            temperature,
        }
    }
}

#[async_trait]
impl ChatAdapter for AzureChatAdapter {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> AdapterResult<PromptSuggestion> {
        let client = self.access.client(&self.deployment)?;
        let to_adapter = |e: OpenAIError| AdapterError::from_openai(SERVICE, e);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(to_adapter)?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(to_adapter)?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.deployment)
            .temperature(self.temperature)
            .messages(messages)
            .response_format(PromptSuggestion::response_format()?)
            .build()
            .map_err(to_adapter)?;

        let response = client.chat().create(request).await.map_err(|e| {
            error!("Chat completion failed: {:?}", e);
            to_adapter(e)
        })?;

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| AdapterError::malformed(SERVICE, "response contained no choices"))?;

        if let Some(refusal) = message.refusal {
            warn!("Chat model refused the request: {}", refusal);
            return Err(AdapterError::malformed(SERVICE, format!("model refused: {}", refusal)));
        }

        let content = message
            .content
            .ok_or_else(|| AdapterError::malformed(SERVICE, "reply had no content"))?;
        debug!(len = content.len(), "Chat completion received");

        PromptSuggestion::parse(&content)
    }
}
