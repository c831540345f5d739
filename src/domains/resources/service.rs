//! Resource service implementation.
//!
//! Lists the published templates and resolves reads against them.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::{debug, info};

use super::definitions::{TemplateResource, all_templates};
use super::error::ResourceError;

/// Service for listing and reading resources.
pub struct ResourceService {
    templates: Vec<Box<dyn TemplateResource>>,
}

impl ResourceService {
    pub fn new() -> Self {
        let templates = all_templates();
        info!("Initializing ResourceService with {} template(s)", templates.len());
        Self { templates }
    }

    /// List all concrete resources. Everything served here is templated.
    pub async fn list_resources(&self) -> Vec<Resource> {
        Vec::new()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.iter().map(|t| t.to_template()).collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        for template in &self.templates {
            if let Some(text) = template.read(uri)? {
                debug!(uri, template = template.uri_template(), "Resolved resource");
                return Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(text, uri)],
                });
            }
        }
        Err(ResourceError::not_found(uri))
    }
}

impl Default for ResourceService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_templates_listed() {
        let service = ResourceService::new();
        assert!(service.list_resources().await.is_empty());

        let templates = service.list_resource_templates().await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "greeting://{name}");
    }

    #[tokio::test]
    async fn test_read_greeting() {
        let service = ResourceService::new();
        let result = service.read_resource("greeting://Ada").await.unwrap();
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, uri, .. } => {
                assert_eq!(text, "Hello, Ada!");
                assert_eq!(uri, "greeting://Ada");
            }
            _ => panic!("Expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_read_unknown_resource() {
        let service = ResourceService::new();
        let result = service.read_resource("mcp://server/nonexistent").await;
        assert_eq!(result.unwrap_err(), ResourceError::not_found("mcp://server/nonexistent"));
    }
}
