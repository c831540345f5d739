//! Document search adapter.
//!
//! Runs hybrid (lexical + vector) queries with semantic reranking against an
//! Azure AI Search index. Rows keep the order the service ranked them in.

use std::num::NonZeroU32;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::error::{AdapterError, AdapterResult, require};
use crate::core::config::{CredentialsConfig, SearchConfig};

const SERVICE: &str = "document search";

/// Weight given to the vector leg of a hybrid query.
pub const VECTOR_WEIGHT: f64 = 0.7;

/// Index field holding the document embeddings.
pub const VECTOR_FIELD: &str = "content_embedding";

/// Which configured index a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IndexSelector {
    Primary,
    Secondary,
}

/// A single document search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    text: String,
    target_index: IndexSelector,
    top_k: NonZeroU32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, target_index: IndexSelector, top_k: NonZeroU32) -> Self {
        Self {
            text: text.into(),
            target_index,
            top_k,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target_index(&self) -> IndexSelector {
        self.target_index
    }

    pub fn top_k(&self) -> u32 {
        self.top_k.get()
    }

    /// The same query aimed at another index.
    pub fn retarget(&self, target_index: IndexSelector) -> Self {
        Self {
            target_index,
            ..self.clone()
        }
    }
}

/// One ranked row returned by the search service.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub content: String,
    /// Semantic reranker score, absent when the service did not rerank the row.
    pub relevance_score: Option<f64>,
}

/// Queries a document index.
#[async_trait]
pub trait SearchAdapter: Send + Sync {
    /// Run `query`; when `vector` is given the query is hybrid.
    async fn query(
        &self,
        query: &SearchQuery,
        vector: Option<&[f32]>,
    ) -> AdapterResult<Vec<SearchResult>>;
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    search: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    vector_queries: Vec<VectorQuery<'a>>,
    query_type: &'static str,
    semantic_configuration: String,
    top: u32,
}

#[derive(Debug, Serialize)]
struct VectorQuery<'a> {
    kind: &'static str,
    vector: &'a [f32],
    k: u32,
    fields: &'static str,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    value: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    document_title: String,
    content_text: String,
    #[serde(rename = "@search.rerankerScore", default)]
    reranker_score: Option<f64>,
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> Self {
        Self {
            title: hit.document_title,
            content: hit.content_text,
            relevance_score: hit.reranker_score,
        }
    }
}

fn search_request<'a>(query: &'a SearchQuery, index: &str, vector: Option<&'a [f32]>) -> SearchRequest<'a> {
    let vector_queries = vector
        .map(|vector| {
            vec![VectorQuery {
                kind: "vector",
                vector,
                k: query.top_k(),
                fields: VECTOR_FIELD,
                weight: VECTOR_WEIGHT,
            }]
        })
        .unwrap_or_default();

    SearchRequest {
        search: query.text(),
        vector_queries,
        query_type: "semantic",
        semantic_configuration: format!("{}-semantic-configuration", index),
        top: query.top_k(),
    }
}

// ============================================================================
// Azure AI Search
// ============================================================================

/// Search adapter backed by the Azure AI Search REST API.
pub struct AzureSearchAdapter {
    endpoint: Option<String>,
    admin_key: Option<String>,
    api_version: String,
    primary_index: String,
    secondary_index: String,
    http: reqwest::Client,
}

impl AzureSearchAdapter {
    pub fn new(credentials: &CredentialsConfig, search: &SearchConfig, http: reqwest::Client) -> Self {
        Self {
            endpoint: credentials.azure_search_endpoint.clone(),
            admin_key: credentials.azure_search_admin_key.clone(),
            api_version: search.api_version.clone(),
            primary_index: search.primary_index.clone(),
            secondary_index: search.secondary_index.clone(),
            http,
        }
    }

    /// Resolve a selector to the configured index name.
    pub fn index_name(&self, selector: IndexSelector) -> &str {
        match selector {
            IndexSelector::Primary => &self.primary_index,
            IndexSelector::Secondary => &self.secondary_index,
        }
    }
}

#[async_trait]
impl SearchAdapter for AzureSearchAdapter {
    async fn query(
        &self,
        query: &SearchQuery,
        vector: Option<&[f32]>,
    ) -> AdapterResult<Vec<SearchResult>> {
        let endpoint = require(&self.endpoint, "AZURE_SEARCH_SERVICE_ENDPOINT")?;
        let admin_key = require(&self.admin_key, "AZURE_SEARCH_ADMIN_KEY")?;
        let index = self.index_name(query.target_index());

        let url = format!(
            "{}/indexes/{}/docs/search?api-version={}",
            endpoint.trim_end_matches('/'),
            index,
            self.api_version
        );
        let body = search_request(query, index, vector);
        debug!(index, top = body.top, hybrid = vector.is_some(), "Querying search index");

        let response = self
            .http
            .post(&url)
            .header("api-key", admin_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Search request failed: {:?}", e);
                AdapterError::from_reqwest(SERVICE, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Search index {} answered HTTP {}", index, status);
            return Err(AdapterError::from_status(SERVICE, response).await);
        }

        let page: SearchPage = response
            .json()
            .await
            .map_err(|e| AdapterError::from_reqwest(SERVICE, e))?;

        Ok(page.value.into_iter().map(SearchResult::from).collect())
    }
}
