//! Tool definitions module.
//!
//! One file per tool. Each tool implements [`ToolHandler`](super::ToolHandler)
//! and is registered by [`build_registry`](super::toolset::build_registry).

mod common;

pub mod add;
pub mod generate_image;
pub mod improve_prompt;
pub mod search_documents;
pub mod search_web;

pub use add::AddTool;
pub use generate_image::GenerateImageTool;
pub use improve_prompt::ImprovePromptTool;
pub use search_documents::{DocumentHit, SearchDocumentsTool};
pub use search_web::SearchWebTool;
