//! Generation domain error types.

use thiserror::Error;

/// Errors raised while assembling a generation request or reading its result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("overlay resource reference must not be empty")]
    EmptyOverlayReference,

    #[error("overlay weight must be a finite number greater than 0 (got {0})")]
    InvalidOverlayWeight(f64),

    #[error("num_images must be between 1 and {max} (got {got})")]
    ImageCount { got: u32, max: u32 },

    /// Inline image data that is not valid base64.
    #[error("inline image data could not be decoded: {0}")]
    Decode(String),

    #[error("image reference is neither a URL nor a base64 data URI: {0}")]
    UnsupportedReference(String),
}
