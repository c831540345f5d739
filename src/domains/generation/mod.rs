//! Image generation domain.
//!
//! Holds the per-request generation model, the overlay merge that turns it
//! into a service payload, and the decoding of returned image descriptors.

mod config;
mod error;
mod image;

pub use config::{
    GenerationConfig, GenerationConfigBuilder, MAX_IMAGES, Overlay, PAYLOAD_KEYS, Payload, build_payload,
};
pub use error::GenerationError;
pub use image::{GeneratedImage, ImageReference};
