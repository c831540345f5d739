//! Shared Azure OpenAI client construction.

use async_openai::{Client, config::AzureConfig};

use super::error::{AdapterResult, require};
use crate::core::config::CredentialsConfig;

/// Credentials and endpoint for an Azure OpenAI resource.
///
/// A fresh SDK client is built for every call and dropped when the call
/// returns; the underlying HTTP connection pool is shared.
#[derive(Clone)]
pub struct AzureOpenAiAccess {
    key: Option<String>,
    endpoint: Option<String>,
    api_version: Option<String>,
    http: reqwest::Client,
}

impl AzureOpenAiAccess {
    pub fn new(credentials: &CredentialsConfig, http: reqwest::Client) -> Self {
        Self {
            key: credentials.azure_openai_key.clone(),
            endpoint: credentials.azure_openai_endpoint.clone(),
            api_version: credentials.azure_openai_api_version.clone(),
            http,
        }
    }

    /// Build a client bound to one model deployment.
    pub fn client(&self, deployment: &str) -> AdapterResult<Client<AzureConfig>> {
        let config = AzureConfig::new()
            .with_api_base(require(&self.endpoint, "AZURE_OPENAI_ENDPOINT")?)
            .with_api_key(require(&self.key, "AZURE_OPENAI_KEY")?)
            .with_api_version(require(&self.api_version, "AZURE_OPENAI_API_VERSION")?)
            .with_deployment_id(deployment);

        Ok(Client::with_config(config).with_http_client(self.http.clone()))
    }
}
