//! Image generation adapter (fal.ai synchronous endpoint).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use super::error::{AdapterError, AdapterResult, require};
use crate::core::config::{CredentialsConfig, GenerationSettings};
use crate::domains::generation::Payload;

const SERVICE: &str = "image generation";

/// One generated image as reported by the service: either a URL or an
/// inline `data:` URI, depending on the request's sync mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageDescriptor {
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Submits a generation payload and returns the produced images in order.
#[async_trait]
pub trait ImageGenAdapter: Send + Sync {
    async fn generate(&self, payload: &Payload) -> AdapterResult<Vec<ImageDescriptor>>;
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    images: Vec<ImageDescriptor>,
}

/// Image generation adapter backed by fal.ai.
pub struct FalImageGenAdapter {
    api_key: Option<String>,
    endpoint: String,
    http: reqwest::Client,
}

impl FalImageGenAdapter {
    pub fn new(credentials: &CredentialsConfig, settings: &GenerationSettings, http: reqwest::Client) -> Self {
        Self {
            api_key: credentials.fal_key.clone(),
            endpoint: format!(
                "{}/{}",
                settings.base_url.trim_end_matches('/'),
                settings.model_id.trim_start_matches('/')
            ),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ImageGenAdapter for FalImageGenAdapter {
    async fn generate(&self, payload: &Payload) -> AdapterResult<Vec<ImageDescriptor>> {
        let api_key = require(&self.api_key, "FAL_KEY")?;
        debug!(endpoint = %self.endpoint, "Submitting image generation request");

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("Key {}", api_key))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Image generation request failed: {:?}", e);
                AdapterError::from_reqwest(SERVICE, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Image generation answered HTTP {}", status);
            return Err(AdapterError::from_status(SERVICE, response).await);
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::from_reqwest(SERVICE, e))?;

        debug!(count = body.images.len(), "Image generation completed");
        Ok(body.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::generation::{GenerationConfig, build_payload};

    fn adapter(credentials: &CredentialsConfig) -> FalImageGenAdapter {
        FalImageGenAdapter::new(credentials, &GenerationSettings::default(), reqwest::Client::new())
    }

    #[test]
    fn test_endpoint_joins_base_and_model() {
        let adapter = adapter(&CredentialsConfig::default());
        assert_eq!(adapter.endpoint(), "https://fal.run/fal-ai/flux-lora");
    }

    #[test]
    fn test_response_parsing_keeps_order() {
        let body: GenerationResponse = serde_json::from_str(
            r#"{"images": [
                {"url": "data:image/png;base64,AAAA", "content_type": "image/png", "width": 1024},
                {"url": "https://cdn.example.com/2.png"}
            ], "seed": 42}"#,
        )
        .unwrap();
        assert_eq!(body.images.len(), 2);
        assert!(body.images[0].url.starts_with("data:"));
        assert_eq!(body.images[1].content_type, None);
    }

    #[tokio::test]
    async fn test_generate_without_key_is_not_configured() {
        let adapter = adapter(&CredentialsConfig::default());
        let config = GenerationConfig::builder("a lighthouse").build().unwrap();
        let err = adapter.generate(&build_payload(&config)).await.unwrap_err();
        assert_eq!(err, AdapterError::NotConfigured("FAL_KEY"));
    }
}
