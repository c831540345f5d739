//! Resource definitions module.
//!
//! Parameterized resources implement [`TemplateResource`]: they publish a URI
//! template (RFC 6570) and resolve concrete URIs that match it.

use rmcp::model::{AnnotateAble, RawResourceTemplate, ResourceTemplate};

use super::error::ResourceError;

pub mod greeting;

pub use greeting::GreetingResource;

/// A resource addressed through a URI template.
pub trait TemplateResource: Send + Sync {
    fn uri_template(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    /// Resolve `uri`, or `Ok(None)` when it does not belong to this template.
    fn read(&self, uri: &str) -> Result<Option<String>, ResourceError>;

    fn to_template(&self) -> ResourceTemplate {
        RawResourceTemplate {
            uri_template: self.uri_template().to_string(),
            name: self.name().to_string(),
            title: None,
            description: Some(self.description().to_string()),
            mime_type: Some(self.mime_type().to_string()),
        }
        .no_annotation()
    }
}

/// Every resource template this server publishes.
pub fn all_templates() -> Vec<Box<dyn TemplateResource>> {
    vec![Box::new(GreetingResource)]
}
