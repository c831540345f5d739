//! Toolset selection.
//!
//! The process serves either the knowledge tools, the image tools, or both,
//! chosen once at startup from [`ToolsConfig::toolset`](crate::core::config::ToolsConfig).

use std::sync::Arc;
use std::time::Duration;

use super::definitions::{AddTool, GenerateImageTool, ImprovePromptTool, SearchDocumentsTool, SearchWebTool};
use super::error::ToolError;
use super::handlers::ToolHandler;
use super::registry::ToolRegistry;
use crate::core::Config;
use crate::domains::remote::RemoteServices;

/// Handlers for the configured toolset, in publication order.
pub fn toolset_handlers(config: &Config, services: &RemoteServices) -> Vec<Arc<dyn ToolHandler>> {
    let toolset = config.tools.toolset;
    let mut handlers: Vec<Arc<dyn ToolHandler>> = Vec::new();

    if toolset.includes_knowledge() {
        handlers.push(Arc::new(
            SearchDocumentsTool::new(services.embedding.clone(), services.search.clone())
                .with_fallback(config.search.fallback_min_results),
        ));
        handlers.push(Arc::new(SearchWebTool::new(services.web_search.clone())));
    }

    if toolset.includes_image() {
        handlers.push(Arc::new(ImprovePromptTool::new(
            services.chat.clone(),
            config.generation.trigger_word.as_str(),
        )));
        handlers.push(Arc::new(GenerateImageTool::new(
            services.image_gen.clone(),
            config.generation.clone(),
        )));
        handlers.push(Arc::new(AddTool));
    }

    handlers
}

/// Build the read-only registry for this process.
pub fn build_registry(config: &Config, services: &RemoteServices) -> Result<ToolRegistry, ToolError> {
    let deadline = match config.tools.invocation_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    Ok(ToolRegistry::builder()
        .deadline(deadline)
        .register_all(toolset_handlers(config, services))?
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Toolset;
    use crate::domains::remote::fakes::{FakeChat, FakeImageGen, FakeSearch, FakeWebSearch, Fakes, row};
    use crate::domains::remote::{AdapterError, IndexSelector, PromptSuggestion};
    use crate::domains::tools::{ToolInvocationResult, ToolPayload};
    use rmcp::model::JsonObject;
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use tokio::sync::Barrier;

    fn config(toolset: Toolset) -> Config {
        let mut config = Config::default();
        config.tools.toolset = toolset;
        config.generation.overlay_reference = Some("https://example.com/lora.safetensors".to_string());
        config
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_toolsets() {
        let fakes = Fakes::default();

        let registry = build_registry(&config(Toolset::Knowledge), &fakes.services()).unwrap();
        assert_eq!(registry.tool_names(), vec!["search_documents", "search_web"]);

        let registry = build_registry(&config(Toolset::Image), &fakes.services()).unwrap();
        assert_eq!(registry.tool_names(), vec!["improve_prompt", "generate_image", "add"]);

        let registry = build_registry(&config(Toolset::All), &fakes.services()).unwrap();
        assert_eq!(registry.tool_names().len(), 5);
    }

    #[test]
    fn test_published_schemas_carry_bounds_and_defaults() {
        let registry = build_registry(&config(Toolset::All), &Fakes::default().services()).unwrap();

        let schema = registry.descriptor("generate_image").unwrap().input_schema();
        let num_images = &schema["properties"]["num_images"];
        assert_eq!(num_images["minimum"], 1);
        assert_eq!(num_images["maximum"], 4);
        assert_eq!(num_images["default"], 1);
        assert_eq!(schema["required"], json!(["prompt"]));

        let schema = registry.descriptor("search_documents").unwrap().input_schema();
        let k = &schema["properties"]["k"];
        assert_eq!(k["minimum"], 1);
        assert_eq!(k["default"], 5);
        assert!(k.get("maximum").is_none());

        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("query")));
        assert!(required.contains(&json!("index_selector")));
        assert!(!required.contains(&json!("k")));
    }

    #[tokio::test]
    async fn test_out_of_range_arguments_never_call_an_adapter() {
        let fakes = Fakes::default();
        let registry = build_registry(&config(Toolset::All), &fakes.services()).unwrap();

        let cases = [
            ("search_documents", json!({ "query": "q", "index_selector": "primary", "k": 0 })),
            ("generate_image", json!({ "prompt": "x", "num_images": 0 })),
            ("generate_image", json!({ "prompt": "x", "num_images": 9 })),
        ];
        for (name, arguments) in cases {
            let result = registry.invoke(name, args(arguments.clone())).await;
            assert!(
                matches!(result, ToolInvocationResult::Error(ToolError::InvalidArgument(_))),
                "{} accepted {}",
                name,
                arguments
            );
        }
        assert_eq!(fakes.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_required_arguments_never_call_an_adapter() {
        let fakes = Fakes::default();
        let registry = build_registry(&config(Toolset::All), &fakes.services()).unwrap();

        for name in registry.tool_names() {
            let result = registry.invoke(name, JsonObject::new()).await;
            assert!(
                matches!(result, ToolInvocationResult::Error(ToolError::InvalidArgument(_))),
                "{} accepted empty arguments",
                name
            );
        }
        assert_eq!(fakes.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_tool_names() {
        let fakes = Fakes::default();
        let registry = build_registry(&config(Toolset::Knowledge), &fakes.services()).unwrap();

        for name in ["generate_image", "", "SEARCH_WEB", "search_documents "] {
            let result = registry.invoke(name, JsonObject::new()).await;
            assert_eq!(result, ToolInvocationResult::Error(ToolError::unknown_tool(name)));
        }
        assert_eq!(fakes.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_search_documents_through_registry_uses_default_k() {
        let fakes = Fakes {
            search: Arc::new(
                FakeSearch::default()
                    .with_rows(IndexSelector::Primary, Ok(vec![row("a", Some(0.9)), row("b", Some(0.4))])),
            ),
            ..Default::default()
        };
        let registry = build_registry(&config(Toolset::Knowledge), &fakes.services()).unwrap();

        let result = registry
            .invoke("search_documents", args(json!({ "query": "q", "index_selector": "primary" })))
            .await;
        let Some(ToolPayload::Json(value)) = result.payload() else {
            panic!("expected JSON payload, got {:?}", result);
        };
        assert_eq!(value["results"][0]["score"], 0.9);
        assert_eq!(value["results"][1]["score"], 0.4);

        assert_eq!(fakes.embedding.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fakes.search.queries.lock().unwrap()[0].0.top_k(), 5);
    }

    #[tokio::test]
    async fn test_generate_image_failure_is_contained() {
        let fakes = Fakes {
            image_gen: Arc::new(FakeImageGen::replying(Err(AdapterError::remote(
                "image generation",
                "HTTP 503",
            )))),
            ..Default::default()
        };
        let registry = build_registry(&config(Toolset::Image), &fakes.services()).unwrap();

        let result = registry
            .invoke("generate_image", args(json!({ "prompt": "a lighthouse" })))
            .await;
        assert!(!result.is_ok());
        assert!(result.message().unwrap().contains("HTTP 503"));

        let payloads = fakes.image_gen.payloads.lock().unwrap();
        assert_eq!(payloads[0]["num_images"], 1);
    }

    #[tokio::test]
    async fn test_concurrent_invocations_do_not_serialize() {
        // both fakes wait on the same barrier, so neither call can finish
        // unless the other is in flight at the same time
        let gate = Arc::new(Barrier::new(2));
        let fakes = Fakes {
            chat: Arc::new(
                FakeChat::replying(Ok(PromptSuggestion {
                    prompt: "Esteban in the rain".to_string(),
                }))
                .gated(gate.clone()),
            ),
            web_search: Arc::new(
                FakeWebSearch::replying(Ok(json!({ "results": ["w"] })))
                    .gated(gate),
            ),
            ..Default::default()
        };
        let registry = Arc::new(build_registry(&config(Toolset::All), &fakes.services()).unwrap());

        let improve = registry.invoke("improve_prompt", args(json!({ "user_query": "rainy street" })));
        let web = registry.invoke("search_web", args(json!({ "query": "weather" })));
        let (improve, web) = tokio::time::timeout(Duration::from_secs(5), async { tokio::join!(improve, web) })
            .await
            .expect("invocations were serialized");

        assert_eq!(improve, ToolInvocationResult::Ok(ToolPayload::Text("Esteban in the rain".to_string())));
        assert_eq!(web, ToolInvocationResult::Ok(ToolPayload::Json(json!({ "results": ["w"] }))));
        assert_eq!(fakes.chat.calls(), 1);
        assert_eq!(fakes.web_search.calls(), 1);
    }
}
