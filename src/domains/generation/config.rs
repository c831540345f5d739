//! Generation request model and the overlay merge.
//!
//! A [`GenerationConfig`] is built per request from the caller's prompt and
//! the process-wide [`GenerationSettings`], then flattened by
//! [`build_payload`] into the body sent to the image service.

use serde_json::{Value, json};

use super::error::GenerationError;
use crate::core::config::GenerationSettings;

/// Outgoing request body for the image service.
pub type Payload = serde_json::Map<String, Value>;

/// Upper bound on images per request accepted by the service.
pub const MAX_IMAGES: u32 = 4;

/// Every key [`build_payload`] emits.
pub const PAYLOAD_KEYS: [&str; 9] = [
    "prompt",
    "loras",
    "sync_mode",
    "image_size",
    "num_inference_steps",
    "guidance_scale",
    "num_images",
    "enable_safety_checker",
    "output_format",
];

/// A weighted style adapter applied on top of the base model.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    reference: String,
    weight: f64,
    label: String,
}

impl Overlay {
    pub fn new(
        reference: impl Into<String>,
        weight: f64,
        label: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(GenerationError::EmptyOverlayReference);
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GenerationError::InvalidOverlayWeight(weight));
        }
        Ok(Self {
            reference,
            weight,
            label: label.into(),
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Trigger token associated with the overlay. Never sent to the service.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// One image generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    prompt: String,
    overlays: Vec<Overlay>,
    sync_mode: bool,
    image_size: String,
    num_inference_steps: u32,
    guidance_scale: f64,
    num_images: u32,
    enable_safety_checker: bool,
    output_format: String,
}

impl GenerationConfig {
    pub fn builder(prompt: impl Into<String>) -> GenerationConfigBuilder {
        GenerationConfigBuilder::new(prompt)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn num_images(&self) -> u32 {
        self.num_images
    }

    pub fn output_format(&self) -> &str {
        &self.output_format
    }
}

/// Builder for [`GenerationConfig`]. Starts from [`GenerationSettings::default`].
pub struct GenerationConfigBuilder {
    prompt: String,
    overlays: Vec<Overlay>,
    settings: GenerationSettings,
    num_images: u32,
}

impl GenerationConfigBuilder {
    fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            overlays: Vec::new(),
            settings: GenerationSettings::default(),
            num_images: 1,
        }
    }

    /// Take base attributes from process configuration.
    pub fn settings(mut self, settings: &GenerationSettings) -> Self {
        self.settings = settings.clone();
        self
    }

    /// Append an overlay; overlays are applied in the order they are added.
    pub fn overlay(mut self, overlay: Overlay) -> Self {
        self.overlays.push(overlay);
        self
    }

    pub fn num_images(mut self, num_images: u32) -> Self {
        self.num_images = num_images;
        self
    }

    pub fn build(self) -> Result<GenerationConfig, GenerationError> {
        if self.prompt.trim().is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }
        if !(1..=MAX_IMAGES).contains(&self.num_images) {
            return Err(GenerationError::ImageCount {
                got: self.num_images,
                max: MAX_IMAGES,
            });
        }

        let settings = self.settings;
        Ok(GenerationConfig {
            prompt: self.prompt,
            overlays: self.overlays,
            sync_mode: settings.sync_mode,
            image_size: settings.image_size,
            num_inference_steps: settings.num_inference_steps,
            guidance_scale: settings.guidance_scale,
            num_images: self.num_images,
            enable_safety_checker: settings.enable_safety_checker,
            output_format: settings.output_format,
        })
    }
}

/// Flatten a request into the image service's body.
///
/// Overlays become `loras: [{path, scale}, ...]` in their original order;
/// labels stay local.
pub fn build_payload(config: &GenerationConfig) -> Payload {
    let loras: Vec<Value> = config
        .overlays
        .iter()
        .map(|overlay| json!({ "path": overlay.reference, "scale": overlay.weight }))
        .collect();

    let mut payload = Payload::new();
    payload.insert("prompt".to_string(), json!(config.prompt));
    payload.insert("loras".to_string(), Value::Array(loras));
    payload.insert("sync_mode".to_string(), json!(config.sync_mode));
    payload.insert("image_size".to_string(), json!(config.image_size));
    payload.insert("num_inference_steps".to_string(), json!(config.num_inference_steps));
    payload.insert("guidance_scale".to_string(), json!(config.guidance_scale));
    payload.insert("num_images".to_string(), json!(config.num_images));
    payload.insert("enable_safety_checker".to_string(), json!(config.enable_safety_checker));
    payload.insert("output_format".to_string(), json!(config.output_format));
    payload
}
