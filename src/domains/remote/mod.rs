//! Remote service adapters.
//!
//! Every outgoing call goes through one of the traits below so tool
//! implementations can be tested against in-memory fakes. Adapters hold no
//! per-request state and are shared across concurrent invocations.

mod azure_openai;
mod chat;
mod embedding;
mod error;
mod image_gen;
mod search;
mod web_search;

#[cfg(test)]
pub(crate) mod fakes;

use std::sync::Arc;
use std::time::Duration;

pub use azure_openai::AzureOpenAiAccess;
pub use chat::{AzureChatAdapter, ChatAdapter, PromptSuggestion};
pub use embedding::{AzureEmbeddingAdapter, EmbeddingAdapter};
pub use error::{AdapterError, AdapterResult};
pub use image_gen::{FalImageGenAdapter, ImageDescriptor, ImageGenAdapter};
pub use search::{
    AzureSearchAdapter, IndexSelector, SearchAdapter, SearchQuery, SearchResult, VECTOR_FIELD,
    VECTOR_WEIGHT,
};
pub use web_search::{LinkupWebSearchAdapter, WebSearchAdapter};

use crate::core::{Config, Error, Result};

/// The set of remote adapters handed to tool constructors.
#[derive(Clone)]
pub struct RemoteServices {
    pub embedding: Arc<dyn EmbeddingAdapter>,
    pub search: Arc<dyn SearchAdapter>,
    pub chat: Arc<dyn ChatAdapter>,
    pub image_gen: Arc<dyn ImageGenAdapter>,
    pub web_search: Arc<dyn WebSearchAdapter>,
}

impl RemoteServices {
    /// Build the production adapters from configuration.
    ///
    /// Missing credentials are not an error here; the affected adapter fails
    /// its calls with [`AdapterError::NotConfigured`] instead.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.tools.http_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        let credentials = &config.credentials;
        let openai = AzureOpenAiAccess::new(credentials, http.clone());

        Ok(Self {
            embedding: Arc::new(AzureEmbeddingAdapter::new(
                openai.clone(),
                &config.models.embedding_deployment,
            )),
            search: Arc::new(AzureSearchAdapter::new(credentials, &config.search, http.clone())),
            chat: Arc::new(AzureChatAdapter::new(
                openai,
                &config.models.chat_deployment,
                config.models.chat_temperature,
            )),
            image_gen: Arc::new(FalImageGenAdapter::new(
                credentials,
                &config.generation,
                http.clone(),
            )),
            web_search: Arc::new(LinkupWebSearchAdapter::new(credentials, http)),
        })
    }
}
