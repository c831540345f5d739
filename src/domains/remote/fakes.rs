//! In-memory adapters for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Barrier;

use super::*;
use crate::domains::generation::Payload;

async fn pass(gate: &Option<Arc<Barrier>>) {
    if let Some(gate) = gate {
        gate.wait().await;
    }
}

#[derive(Default)]
pub(crate) struct FakeEmbedding {
    pub calls: AtomicUsize,
    reply: Option<AdapterResult<Vec<f32>>>,
}

impl FakeEmbedding {
    pub fn replying(reply: AdapterResult<Vec<f32>>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: Some(reply),
        }
    }
}

#[async_trait]
impl EmbeddingAdapter for FakeEmbedding {
    async fn embed(&self, _text: &str) -> AdapterResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().unwrap_or_else(|| Ok(vec![0.1, 0.2, 0.3]))
    }
}

#[derive(Default)]
pub(crate) struct FakeSearch {
    pub queries: Mutex<Vec<(SearchQuery, Option<Vec<f32>>)>>,
    replies: HashMap<&'static str, AdapterResult<Vec<SearchResult>>>,
}

impl FakeSearch {
    pub fn with_rows(mut self, selector: IndexSelector, rows: AdapterResult<Vec<SearchResult>>) -> Self {
        self.replies.insert(key(selector), rows);
        self
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

fn key(selector: IndexSelector) -> &'static str {
    match selector {
        IndexSelector::Primary => "primary",
        IndexSelector::Secondary => "secondary",
    }
}

pub(crate) fn row(title: &str, score: Option<f64>) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        content: format!("{} body", title),
        relevance_score: score,
    }
}

#[async_trait]
impl SearchAdapter for FakeSearch {
    async fn query(&self, query: &SearchQuery, vector: Option<&[f32]>) -> AdapterResult<Vec<SearchResult>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.clone(), vector.map(<[f32]>::to_vec)));
        self.replies
            .get(key(query.target_index()))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Default)]
pub(crate) struct FakeChat {
    pub exchanges: Mutex<Vec<(String, String)>>,
    reply: Option<AdapterResult<PromptSuggestion>>,
    gate: Option<Arc<Barrier>>,
}

impl FakeChat {
    pub fn replying(reply: AdapterResult<PromptSuggestion>) -> Self {
        Self {
            reply: Some(reply),
            ..Default::default()
        }
    }

    pub fn gated(mut self, gate: Arc<Barrier>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.exchanges.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatAdapter for FakeChat {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> AdapterResult<PromptSuggestion> {
        self.exchanges
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        pass(&self.gate).await;
        self.reply.clone().unwrap_or_else(|| {
            Ok(PromptSuggestion {
                prompt: "a detailed prompt".to_string(),
            })
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeImageGen {
    pub payloads: Mutex<Vec<Payload>>,
    reply: Option<AdapterResult<Vec<ImageDescriptor>>>,
}

impl FakeImageGen {
    pub fn replying(reply: AdapterResult<Vec<ImageDescriptor>>) -> Self {
        Self {
            reply: Some(reply),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageGenAdapter for FakeImageGen {
    async fn generate(&self, payload: &Payload) -> AdapterResult<Vec<ImageDescriptor>> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.reply.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Default)]
pub(crate) struct FakeWebSearch {
    pub queries: Mutex<Vec<String>>,
    reply: Option<AdapterResult<Value>>,
    gate: Option<Arc<Barrier>>,
}

impl FakeWebSearch {
    pub fn replying(reply: AdapterResult<Value>) -> Self {
        Self {
            reply: Some(reply),
            ..Default::default()
        }
    }

    pub fn gated(mut self, gate: Arc<Barrier>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl WebSearchAdapter for FakeWebSearch {
    async fn search(&self, query: &str) -> AdapterResult<Value> {
        self.queries.lock().unwrap().push(query.to_string());
        pass(&self.gate).await;
        self.reply
            .clone()
            .unwrap_or_else(|| Ok(serde_json::json!({ "results": [] })))
    }
}

/// Concrete fakes kept alongside the trait-object bundle so tests can
/// inspect what each adapter saw.
#[derive(Clone, Default)]
pub(crate) struct Fakes {
    pub embedding: Arc<FakeEmbedding>,
    pub search: Arc<FakeSearch>,
    pub chat: Arc<FakeChat>,
    pub image_gen: Arc<FakeImageGen>,
    pub web_search: Arc<FakeWebSearch>,
}

impl Fakes {
    pub fn services(&self) -> RemoteServices {
        RemoteServices {
            embedding: self.embedding.clone(),
            search: self.search.clone(),
            chat: self.chat.clone(),
            image_gen: self.image_gen.clone(),
            web_search: self.web_search.clone(),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.embedding.calls.load(Ordering::SeqCst)
            + self.search.calls()
            + self.chat.calls()
            + self.image_gen.calls()
            + self.web_search.calls()
    }
}
