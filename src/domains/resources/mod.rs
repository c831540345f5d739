//! Resources domain module.
//!
//! Resources are data clients can read by URI.
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod service;

pub use definitions::TemplateResource;
pub use error::ResourceError;
pub use service::ResourceService;
