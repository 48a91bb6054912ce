//! Provider seams consumed by the pipeline, plus the production adapters.
//!
//! The pipeline only sees these traits; production wiring plugs in the
//! concrete clients, tests plug in in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;

use llm_service::OpenAiService;
use query_log::{LogEntry, SearchLog};
use vector_search::{SearchIndex, SearchResult};

use crate::error::QaError;

/// Provider interface for query embedding.
#[async_trait]
pub trait EmbeddingsProvider: Send + Sync {
    /// Embed `text` and return a single query vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, QaError>;
}

/// Provider interface for k-NN retrieval.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for the `k` nearest neighbors of `vector`; `None` uses the
    /// provider's configured default. An empty result is not an error.
    async fn knn_search(
        &self,
        vector: Vec<f32>,
        k: Option<usize>,
    ) -> Result<Vec<SearchResult>, QaError>;
}

/// Provider interface for answer generation.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Run a `(system, user)` prompt pair and return the model text verbatim.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, QaError>;
}

/// Write-only store for interaction records.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Append one record; never reads anything back.
    async fn append(&self, entry: LogEntry) -> Result<(), QaError>;
}

/* ---------------------------- production adapters ---------------------------- */

#[async_trait]
impl EmbeddingsProvider for OpenAiService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, QaError> {
        self.embeddings(text)
            .await
            .map_err(|e| QaError::Embedding(e.to_string()))
    }
}

#[async_trait]
impl GenerationProvider for OpenAiService {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, QaError> {
        OpenAiService::generate(self, prompt, Some(system))
            .await
            .map_err(|e| QaError::Generation(e.to_string()))
    }
}

#[async_trait]
impl SearchProvider for SearchIndex {
    async fn knn_search(
        &self,
        vector: Vec<f32>,
        k: Option<usize>,
    ) -> Result<Vec<SearchResult>, QaError> {
        SearchIndex::knn_search(self, vector, k)
            .await
            .map_err(|e| QaError::Search(e.to_string()))
    }
}

/// Bridges the blocking SQLite log into async via `spawn_blocking`.
pub struct BlockingLogStore {
    inner: Arc<SearchLog>,
}

impl BlockingLogStore {
    pub fn new(inner: Arc<SearchLog>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LogStore for BlockingLogStore {
    async fn append(&self, entry: LogEntry) -> Result<(), QaError> {
        let log = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || log.append(&entry))
            .await
            .map_err(|e| QaError::LogPersistence(format!("join error: {e}")))?
            .map_err(|e| QaError::LogPersistence(e.to_string()))
    }
}
