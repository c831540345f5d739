//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: registry, dispatch and the tool implementations
//! - **generation**: image generation request model and result decoding
//! - **remote**: adapters for the embedding, search, chat, image and web services
//! - **prompts** / **resources**: the small MCP prompt and resource surface

pub mod generation;
pub mod prompts;
pub mod remote;
pub mod resources;
pub mod tools;
