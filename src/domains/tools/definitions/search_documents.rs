//! Document search tool.
//!
//! Embeds the query, then runs a hybrid search against the selected index.
//! Rows are returned in the order the search service ranked them.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};

use super::common::parse_params;
use crate::domains::remote::{EmbeddingAdapter, IndexSelector, SearchAdapter, SearchQuery, SearchResult};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler, ToolPayload};

/// Default number of rows returned.
pub const DEFAULT_TOP_K: u32 = 5;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchDocumentsParams {
    #[schemars(description = "What to search for")]
    pub query: String,

    #[schemars(description = "Index to search: 'primary' or 'secondary'")]
    pub index_selector: IndexSelector,

    #[serde(default = "default_top_k")]
    #[schemars(description = "Number of results to return", range(min = 1))]
    pub k: u32,
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

/// One normalized search row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentHit {
    pub document_title: String,
    pub content_text: String,
    /// Reranker score, `null` when the service did not rerank the row.
    pub score: Option<f64>,
}

impl From<SearchResult> for DocumentHit {
    fn from(row: SearchResult) -> Self {
        Self {
            document_title: row.title,
            content_text: row.content,
            score: row.relevance_score,
        }
    }
}

/// Hybrid document search over the configured indexes.
pub struct SearchDocumentsTool {
    embedding: Arc<dyn EmbeddingAdapter>,
    search: Arc<dyn SearchAdapter>,
    fallback_min_results: Option<usize>,
}

impl SearchDocumentsTool {
    pub const NAME: &'static str = "search_documents";

    pub const DESCRIPTION: &'static str = "Search the internal knowledge base with a hybrid keyword and vector query. \
        Query the 'primary' index (official documentation) first; query the 'secondary' index \
        (in-depth research material) only when the primary index returns nothing useful.";

    pub fn new(embedding: Arc<dyn EmbeddingAdapter>, search: Arc<dyn SearchAdapter>) -> Self {
        Self {
            embedding,
            search,
            fallback_min_results: None,
        }
    }

    /// Retry primary searches that return fewer than `min_results` rows
    /// against the secondary index.
    pub fn with_fallback(mut self, min_results: Option<usize>) -> Self {
        self.fallback_min_results = min_results;
        self
    }

    pub async fn execute(&self, params: &SearchDocumentsParams) -> Result<Vec<DocumentHit>, ToolError> {
        let top_k = NonZeroU32::new(params.k).ok_or_else(|| ToolError::invalid_argument("k must be at least 1"))?;
        let query = SearchQuery::new(params.query.as_str(), params.index_selector, top_k);

        let vector = self.embedding.embed(query.text()).await?;
        let mut rows = self.search.query(&query, Some(&vector)).await?;

        let below_threshold = self
            .fallback_min_results
            .is_some_and(|min| query.target_index() == IndexSelector::Primary && rows.len() < min);
        if below_threshold {
            debug!(found = rows.len(), "Primary index below threshold, trying secondary");
            let secondary = self
                .search
                .query(&query.retarget(IndexSelector::Secondary), Some(&vector))
                .await?;
            if !secondary.is_empty() {
                rows = secondary;
            }
        }

        Ok(rows.into_iter().map(DocumentHit::from).collect())
    }
}

#[async_trait]
impl ToolHandler for SearchDocumentsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::for_params::<SearchDocumentsParams>(Self::NAME, Self::DESCRIPTION)
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: JsonObject) -> Result<ToolPayload, ToolError> {
        let params: SearchDocumentsParams = parse_params(arguments)?;
        info!("Document search called: {:?} on {:?} (k={})", params.query, params.index_selector, params.k);

        let hits = self.execute(&params).await?;
        debug!(count = hits.len(), "Document search completed");
        Ok(ToolPayload::Json(json!({ "results": hits })))
    }
}
