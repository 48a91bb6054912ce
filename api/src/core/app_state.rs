//! Process-wide shared state: provider clients built once at startup.

use std::sync::Arc;

use llm_service::{OpenAiService, config_chat, config_embedding};
use qa_gateway::{
    BlockingLogStore, EmbeddingsProvider, GenerationProvider, LogStore, QaPipeline, SearchProvider,
};
use query_log::SearchLog;
use thiserror::Error;
use vector_search::{SearchIndex, SearchIndexConfig};

/// Startup configuration failures, one variant per provider boundary.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Llm(#[from] llm_service::LlmServiceError),

    #[error(transparent)]
    Search(#[from] vector_search::VectorSearchError),

    #[error(transparent)]
    Log(#[from] query_log::QueryLogError),
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// The wired query pipeline; handlers only ever call `handle`.
    pub pipeline: Arc<QaPipeline>,
}

impl AppState {
    /// Build all provider clients from environment variables and wire the
    /// pipeline. Called exactly once, before the server starts accepting
    /// requests.
    pub fn from_env() -> Result<Self, ConfigError> {
        let embedder: Arc<dyn EmbeddingsProvider> =
            Arc::new(OpenAiService::new(config_embedding()?)?);
        let generator: Arc<dyn GenerationProvider> =
            Arc::new(OpenAiService::new(config_chat()?)?);

        let index: Arc<dyn SearchProvider> =
            Arc::new(SearchIndex::connect(SearchIndexConfig::from_env()?)?);

        let log_path =
            std::env::var("SEARCH_LOG_PATH").unwrap_or_else(|_| "search_log.db".into());
        let store = Arc::new(SearchLog::open(log_path)?);
        let log: Arc<dyn LogStore> = Arc::new(BlockingLogStore::new(store));

        let pipeline = Arc::new(QaPipeline::new(embedder, index, generator, log));

        Ok(Self { pipeline })
    }
}
