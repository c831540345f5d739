//! Image generation tool.
//!
//! Applies the configured style overlay to the caller's prompt, submits the
//! request and returns the first image. Inline images come back as bytes;
//! hosted images come back as a URL for the caller to fetch.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use super::common::parse_params;
use crate::core::config::GenerationSettings;
use crate::domains::generation::{GenerationConfig, ImageReference, MAX_IMAGES, Overlay, build_payload};
use crate::domains::remote::ImageGenAdapter;
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler, ToolPayload};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateImageParams {
    #[schemars(description = "Full image prompt")]
    pub prompt: String,

    #[serde(default = "default_num_images")]
    #[schemars(
        description = "Number of images to generate; only the first is returned",
        range(min = 1, max = MAX_IMAGES)
    )]
    pub num_images: u32,
}

fn default_num_images() -> u32 {
    1
}

pub struct GenerateImageTool {
    image_gen: Arc<dyn ImageGenAdapter>,
    settings: GenerationSettings,
}

impl GenerateImageTool {
    pub const NAME: &'static str = "generate_image";

    pub const DESCRIPTION: &'static str = "Generate an image with FLUX.1 and the configured LoRA style. \
        For best results pass a prompt produced by improve_prompt.";

    pub fn new(image_gen: Arc<dyn ImageGenAdapter>, settings: GenerationSettings) -> Self {
        Self { image_gen, settings }
    }

    /// The fixed overlay taken from process configuration.
    fn overlay(&self) -> Result<Overlay, ToolError> {
        let reference = self
            .settings
            .overlay_reference
            .as_deref()
            .ok_or_else(|| ToolError::configuration("LORA_PATH is not set"))?;
        Ok(Overlay::new(
            reference,
            self.settings.overlay_weight,
            self.settings.trigger_word.as_str(),
        )?)
    }

    pub async fn execute(&self, params: &GenerateImageParams) -> Result<ImageReference, ToolError> {
        let config = GenerationConfig::builder(params.prompt.as_str())
            .settings(&self.settings)
            .overlay(self.overlay()?)
            .num_images(params.num_images)
            .build()?;
        let payload = build_payload(&config);

        let images = self.image_gen.generate(&payload).await?;
        debug!(count = images.len(), "Images returned");

        let first = images
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::MalformedResponse("image generation returned no images".to_string()))?;

        Ok(ImageReference::parse(
            &first.url,
            first.content_type.as_deref(),
            config.output_format(),
        )?)
    }
}

#[async_trait]
impl ToolHandler for GenerateImageTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::for_params::<GenerateImageParams>(Self::NAME, Self::DESCRIPTION)
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: JsonObject) -> Result<ToolPayload, ToolError> {
        let params: GenerateImageParams = parse_params(arguments)?;
        info!("Image generation called (num_images={})", params.num_images);

        Ok(match self.execute(&params).await? {
            ImageReference::Inline(image) => {
                debug!(bytes = image.binary_data.len(), format = %image.format, "Decoded inline image");
                ToolPayload::Image(image)
            }
            ImageReference::Url { url, format } => ToolPayload::Json(json!({ "url": url, "format": format })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::generation::GeneratedImage;
    use crate::domains::remote::fakes::FakeImageGen;
    use crate::domains::remote::{AdapterError, ImageDescriptor};
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    fn settings() -> GenerationSettings {
        GenerationSettings {
            overlay_reference: Some("https://example.com/esteban.safetensors".to_string()),
            ..Default::default()
        }
    }

    fn args(prompt: &str) -> JsonObject {
        json!({ "prompt": prompt, "num_images": 1 }).as_object().cloned().unwrap()
    }

    fn inline(bytes: &[u8]) -> ImageDescriptor {
        ImageDescriptor {
            url: format!("data:image/png;base64,{}", STANDARD.encode(bytes)),
            content_type: Some("image/png".to_string()),
        }
    }

    #[tokio::test]
    async fn test_inline_image_is_decoded() {
        let fake = Arc::new(FakeImageGen::replying(Ok(vec![inline(b"png-bytes"), inline(b"second")])));
        let tool = GenerateImageTool::new(fake.clone(), settings());

        let payload = tool.call(args("Esteban on a beach")).await.unwrap();
        assert_eq!(
            payload,
            ToolPayload::Image(GeneratedImage {
                binary_data: b"png-bytes".to_vec(),
                format: "png".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_payload_carries_exactly_one_overlay() {
        let fake = Arc::new(FakeImageGen::replying(Ok(vec![inline(b"x")])));
        let tool = GenerateImageTool::new(fake.clone(), settings());

        tool.call(args("Esteban reading")).await.unwrap();

        let payloads = fake.payloads.lock().unwrap();
        assert_eq!(payloads[0]["prompt"], "Esteban reading");
        assert_eq!(
            payloads[0]["loras"],
            json!([{ "path": "https://example.com/esteban.safetensors", "scale": 1.0 }])
        );
        assert_eq!(payloads[0]["num_images"], 1);
    }

    #[tokio::test]
    async fn test_url_is_returned_for_caller() {
        let fake = Arc::new(FakeImageGen::replying(Ok(vec![ImageDescriptor {
            url: "https://v3.fal.media/files/out.jpeg".to_string(),
            content_type: Some("image/jpeg".to_string()),
        }])));
        let tool = GenerateImageTool::new(fake, settings());

        let payload = tool.call(args("x")).await.unwrap();
        assert_eq!(
            payload,
            ToolPayload::Json(json!({ "url": "https://v3.fal.media/files/out.jpeg", "format": "jpeg" }))
        );
    }

    #[tokio::test]
    async fn test_adapter_failure_becomes_error_with_message() {
        let fake = Arc::new(FakeImageGen::replying(Err(AdapterError::remote(
            "image generation",
            "HTTP 422: prompt rejected",
        ))));
        let tool = GenerateImageTool::new(fake, settings());

        let err = tool.call(args("x")).await.unwrap_err();
        assert!(matches!(err, ToolError::RemoteCall(_)));
        assert!(err.to_string().contains("prompt rejected"));
    }

    #[tokio::test]
    async fn test_bad_inline_data_is_decode_error() {
        let fake = Arc::new(FakeImageGen::replying(Ok(vec![ImageDescriptor {
            url: "data:image/png;base64,%%%".to_string(),
            content_type: None,
        }])));
        let tool = GenerateImageTool::new(fake, settings());

        let err = tool.call(args("x")).await.unwrap_err();
        assert!(matches!(err, ToolError::Decode(_)));
    }

    #[tokio::test]
    async fn test_empty_image_list_is_malformed() {
        let fake = Arc::new(FakeImageGen::replying(Ok(Vec::new())));
        let tool = GenerateImageTool::new(fake, settings());

        let err = tool.call(args("x")).await.unwrap_err();
        assert!(matches!(err, ToolError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_overlay_is_configuration_error_without_remote_call() {
        let fake = Arc::new(FakeImageGen::default());
        let tool = GenerateImageTool::new(fake.clone(), GenerationSettings::default());

        let err = tool.call(args("x")).await.unwrap_err();
        assert_eq!(err, ToolError::configuration("LORA_PATH is not set"));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_image_count_out_of_range() {
        let fake = Arc::new(FakeImageGen::default());
        let tool = GenerateImageTool::new(fake.clone(), settings());

        let arguments = json!({ "prompt": "x", "num_images": 9 }).as_object().cloned().unwrap();
        let err = tool.call(arguments).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
        assert_eq!(fake.calls(), 0);
    }
}
