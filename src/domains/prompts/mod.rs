//! Prompts domain module.
//!
//! Prompts are message templates clients can fetch and fill with arguments.
//!
//! - `definitions/` - Individual prompt definitions (one file per prompt)
//! - `service.rs` - Prompt service for listing and rendering

pub mod definitions;
mod error;
mod service;

pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use service::PromptService;
