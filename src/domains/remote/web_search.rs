//! Web search adapter (Linkup).

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::error::{AdapterError, AdapterResult, require};
use crate::core::config::CredentialsConfig;

const SERVICE: &str = "web search";
const LINKUP_SEARCH_URL: &str = "https://api.linkup.so/v1/search";

/// Searches the public web; the reply is passed through untouched.
#[async_trait]
pub trait WebSearchAdapter: Send + Sync {
    async fn search(&self, query: &str) -> AdapterResult<Value>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkupRequest<'a> {
    q: &'a str,
    depth: &'static str,
    output_type: &'static str,
}

impl<'a> LinkupRequest<'a> {
    fn standard(query: &'a str) -> Self {
        Self {
            q: query,
            depth: "standard",
            output_type: "searchResults",
        }
    }
}

/// Web search adapter backed by the Linkup API.
pub struct LinkupWebSearchAdapter {
    api_key: Option<String>,
    http: reqwest::Client,
}

impl LinkupWebSearchAdapter {
    pub fn new(credentials: &CredentialsConfig, http: reqwest::Client) -> Self {
        Self {
            api_key: credentials.linkup_api_key.clone(),
            http,
        }
    }
}

#[async_trait]
impl WebSearchAdapter for LinkupWebSearchAdapter {
    async fn search(&self, query: &str) -> AdapterResult<Value> {
        let api_key = require(&self.api_key, "LINKUP_API_KEY")?;

        let response = self
            .http
            .post(LINKUP_SEARCH_URL)
            .bearer_auth(api_key)
            .json(&LinkupRequest::standard(query))
            .send()
            .await
            .map_err(|e| {
                error!("Web search request failed: {:?}", e);
                AdapterError::from_reqwest(SERVICE, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::from_status(SERVICE, response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AdapterError::from_reqwest(SERVICE, e))?;
        debug!("Web search completed");
        Ok(body)
    }
}
