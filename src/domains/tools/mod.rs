//! Tools domain module.
//!
//! Tools are the operations MCP clients invoke. Every invocation goes through
//! [`ToolRegistry::invoke`], which validates arguments against the tool's
//! [`ToolDescriptor`] and contains any failure as an error result.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `descriptor.rs` - Tool metadata and argument preparation
//! - `handlers.rs` - The `ToolHandler` trait and result shape
//! - `containment.rs` - Panic and deadline containment
//! - `registry.rs` - Startup registration and dispatch
//! - `router.rs` - Dynamic rmcp ToolRouter built from the registry
//! - `toolset.rs` - Which tools a process serves
//! - `error.rs` - Tool-specific error types

mod containment;
pub mod definitions;
mod descriptor;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod toolset;

pub use containment::contain;
pub use descriptor::{ParameterSpec, ToolDescriptor};
pub use error::ToolError;
pub use handlers::{ToolHandler, ToolInvocationResult, ToolPayload};
pub use registry::{Registered, ToolRegistry, ToolRegistryBuilder, Uninitialized};
pub use router::build_tool_router;
pub use toolset::build_registry;
