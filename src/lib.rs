//! Generative AI MCP Server Library
//!
//! An MCP server exposing knowledge-base search, web search, prompt
//! improvement and LoRA-styled image generation as tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: registry, dispatch, failure containment and the tool handlers
//!   - **generation**: image request payloads and result decoding
//!   - **remote**: adapters for Azure OpenAI, Azure AI Search, fal.ai and Linkup
//!   - **resources** / **prompts**: the greeting resource template and prompt
//!
//! # Example
//!
//! ```rust,no_run
//! use genai_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
