//! Embedding adapter.

use async_openai::types::CreateEmbeddingRequestArgs;
use async_trait::async_trait;
use tracing::{debug, error};

use super::azure_openai::AzureOpenAiAccess;
use super::error::{AdapterError, AdapterResult};

const SERVICE: &str = "embedding";

/// Turns a text into a dense vector.
#[async_trait]
pub trait EmbeddingAdapter: Send + Sync {
    async fn embed(&self, text: &str) -> AdapterResult<Vec<f32>>;
}

/// Embedding adapter backed by an Azure OpenAI embedding deployment.
pub struct AzureEmbeddingAdapter {
    access: AzureOpenAiAccess,
    deployment: String,
}

impl AzureEmbeddingAdapter {
    pub fn new(access: AzureOpenAiAccess, deployment: impl Into<String>) -> Self {
        Self {
            access,
            deployment: deployment.into(),
        }
    }
}

#[async_trait]
impl EmbeddingAdapter for AzureEmbeddingAdapter {
    async fn embed(&self, text: &str) -> AdapterResult<Vec<f32>> {
        let client = self.access.client(&self.deployment)?;

        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.deployment)
            .input(text.to_string())
            .build()
            .map_err(|e| AdapterError::from_openai(SERVICE, e))?;

        let response = client.embeddings().create(request).await.map_err(|e| {
            error!("Embedding request failed: {:?}", e);
            AdapterError::from_openai(SERVICE, e)
        })?;

        let vector = response
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| AdapterError::malformed(SERVICE, "response contained no embedding"))?;

        debug!(dimensions = vector.len(), "Embedded query");
        Ok(vector)
    }
}
