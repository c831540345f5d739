//! Personalized greeting resource.

use super::TemplateResource;
use crate::domains::resources::ResourceError;

/// `greeting://{name}` reads as `Hello, {name}!`.
pub struct GreetingResource;

impl GreetingResource {
    const SCHEME: &'static str = "greeting://";
}

impl TemplateResource for GreetingResource {
    fn uri_template(&self) -> &'static str {
        "greeting://{name}"
    }

    fn name(&self) -> &'static str {
        "Greeting"
    }

    fn description(&self) -> &'static str {
        "Get a personalized greeting"
    }

    fn read(&self, uri: &str) -> Result<Option<String>, ResourceError> {
        let Some(name) = uri.strip_prefix(Self::SCHEME) else {
            return Ok(None);
        };
        let name = name.trim_end_matches('/');
        if name.is_empty() || name.contains('/') {
            return Err(ResourceError::invalid_uri(uri));
        }
        Ok(Some(format!("Hello, {}!", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_greeting() {
        assert_eq!(GreetingResource.read("greeting://Ada").unwrap().as_deref(), Some("Hello, Ada!"));
    }

    #[test]
    fn test_other_schemes_do_not_match() {
        assert_eq!(GreetingResource.read("file:///etc/hosts").unwrap(), None);
    }

    #[test]
    fn test_empty_or_nested_name_is_invalid() {
        assert!(matches!(GreetingResource.read("greeting://"), Err(ResourceError::InvalidUri(_))));
        assert!(GreetingResource.read("greeting://a/b").is_err());
    }

    #[test]
    fn test_template_metadata() {
        let template = GreetingResource.to_template();
        assert_eq!(template.raw.uri_template, "greeting://{name}");
        assert_eq!(template.raw.mime_type.as_deref(), Some("text/plain"));
    }
}
