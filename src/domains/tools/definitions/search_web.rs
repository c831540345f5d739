//! Web search tool. Returns the search provider's reply as-is.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::parse_params;
use crate::domains::remote::WebSearchAdapter;
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler, ToolPayload};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchWebParams {
    #[schemars(description = "Search query")]
    pub query: String,
}

pub struct SearchWebTool {
    web_search: Arc<dyn WebSearchAdapter>,
}

impl SearchWebTool {
    pub const NAME: &'static str = "search_web";

    pub const DESCRIPTION: &'static str =
        "Search the public web for recent or external information not covered by the knowledge base.";

    pub fn new(web_search: Arc<dyn WebSearchAdapter>) -> Self {
        Self { web_search }
    }
}

#[async_trait]
impl ToolHandler for SearchWebTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::for_params::<SearchWebParams>(Self::NAME, Self::DESCRIPTION)
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: JsonObject) -> Result<ToolPayload, ToolError> {
        let params: SearchWebParams = parse_params(arguments)?;
        info!("Web search called: {:?}", params.query);
        Ok(ToolPayload::Json(self.web_search.search(&params.query).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::remote::AdapterError;
    use crate::domains::remote::fakes::FakeWebSearch;
    use serde_json::json;

    fn args(query: &str) -> JsonObject {
        json!({ "query": query }).as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_reply_is_passed_through_unmodified() {
        let reply = json!({ "results": [{ "name": "Rust", "url": "https://www.rust-lang.org", "content": "..." }] });
        let fake = Arc::new(FakeWebSearch::replying(Ok(reply.clone())));
        let tool = SearchWebTool::new(fake.clone());

        let payload = tool.call(args("rust language")).await.unwrap();
        assert_eq!(payload, ToolPayload::Json(reply));
        assert_eq!(*fake.queries.lock().unwrap(), vec!["rust language".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_is_remote_call_error() {
        let fake = Arc::new(FakeWebSearch::replying(Err(AdapterError::NotConfigured("LINKUP_API_KEY"))));
        let tool = SearchWebTool::new(fake);

        let err = tool.call(args("anything")).await.unwrap_err();
        assert_eq!(err, ToolError::RemoteCall("LINKUP_API_KEY is not configured".to_string()));
    }
}
