//! RAG + LLM gateway with a single public entry point.
//!
//! Public API: [`QaPipeline::handle`]. It embeds the question, retrieves
//! top-K chunks from the vector index, projects them to the reduced field
//! set, renders the fixed prompt, calls the generative model, and appends an
//! interaction record to the query log.
//!
//! The five steps are strictly sequential and fail-fast: a failed step
//! aborts the rest of the run. No retries, no caching, no deduplication of
//! concurrent identical queries — every call is a fresh round trip.

mod error;
pub mod project;
pub mod prompt;
pub mod providers;

pub use error::QaError;
pub use project::{ProjectedDoc, project};
pub use providers::{
    BlockingLogStore, EmbeddingsProvider, GenerationProvider, LogStore, SearchProvider,
};

use std::sync::Arc;

use chrono::Utc;
use query_log::LogEntry;
use tracing::{debug, info};

/// The query orchestrator: holds one shared client per provider boundary.
///
/// Construct once at startup and share behind an `Arc`; runs exchange no
/// data with each other, so no locking is needed here.
pub struct QaPipeline {
    embedder: Arc<dyn EmbeddingsProvider>,
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn GenerationProvider>,
    log: Arc<dyn LogStore>,
}

impl QaPipeline {
    /// Wire the pipeline from its four provider seams.
    pub fn new(
        embedder: Arc<dyn EmbeddingsProvider>,
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn GenerationProvider>,
        log: Arc<dyn LogStore>,
    ) -> Self {
        Self {
            embedder,
            search,
            generator,
            log,
        }
    }

    /// Answer `query` for `user_id` with the provider's default neighbor count.
    pub async fn handle(&self, query: &str, user_id: &str) -> Result<String, QaError> {
        self.handle_with_k(query, user_id, None).await
    }

    /// Answer `query` for `user_id`, overriding the neighbor count with `k`.
    ///
    /// Steps, in order: embed → k-NN search → project → generate → log.
    /// The model output is returned verbatim, empty string included. The
    /// log write runs only after a successful generation, and its failure
    /// is surfaced to the caller even though the answer was already
    /// computed.
    ///
    /// # Errors
    /// One [`QaError`] variant per failing step; the first failure wins.
    pub async fn handle_with_k(
        &self,
        query: &str,
        user_id: &str,
        k: Option<usize>,
    ) -> Result<String, QaError> {
        info!(
            target: "qa::pipeline",
            user_id = user_id,
            query = query,
            "handle: start"
        );

        let vector = self.embedder.embed(query).await?;
        debug!(target: "qa::pipeline", dim = vector.len(), "query embedded");

        let hits = self.search.knn_search(vector, k).await?;
        debug!(target: "qa::pipeline", hits = hits.len(), "vector search finished");

        let docs = project(hits);

        let user_prompt = prompt::render_user_prompt(query, &docs);
        let output = self
            .generator
            .generate(prompt::SYSTEM_PROMPT, &user_prompt)
            .await?;

        let entry = LogEntry {
            user_id: user_id.to_string(),
            query: query.to_string(),
            output: output.clone(),
            timestamp: Utc::now(),
        };
        self.log.append(entry).await?;

        info!(
            target: "qa::pipeline",
            user_id = user_id,
            output_len = output.len(),
            "handle: finished"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use vector_search::SearchResult;

    fn hit(chunk_id: &str, title: &str, chunk: &str) -> SearchResult {
        SearchResult {
            score: 0.9,
            chunk_id: chunk_id.into(),
            parent_id: "doc-1".into(),
            chunk: chunk.into(),
            title: title.into(),
        }
    }

    #[derive(Default)]
    struct FakeEmbedder {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingsProvider for FakeEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, QaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(QaError::Embedding("provider down".into()));
            }
            Ok(vec![0.1, 0.2, 0.3])
        }
    }

    #[derive(Default)]
    struct FakeSearch {
        calls: AtomicUsize,
        results: Vec<SearchResult>,
        fail: bool,
    }

    #[async_trait]
    impl SearchProvider for FakeSearch {
        async fn knn_search(
            &self,
            _vector: Vec<f32>,
            _k: Option<usize>,
        ) -> Result<Vec<SearchResult>, QaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(QaError::Search("index unreachable".into()));
            }
            Ok(self.results.clone())
        }
    }

    #[derive(Default)]
    struct FakeGenerator {
        calls: AtomicUsize,
        output: String,
        fail: bool,
        last_prompt: Mutex<Option<String>>,
    }

    #[async_trait]
    impl GenerationProvider for FakeGenerator {
        async fn generate(&self, _system: &str, prompt: &str) -> Result<String, QaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            if self.fail {
                return Err(QaError::Generation("model error".into()));
            }
            Ok(self.output.clone())
        }
    }

    #[derive(Default)]
    struct RecordingLog {
        calls: AtomicUsize,
        entries: Mutex<Vec<LogEntry>>,
        fail: bool,
    }

    #[async_trait]
    impl LogStore for RecordingLog {
        async fn append(&self, entry: LogEntry) -> Result<(), QaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(QaError::LogPersistence("store down".into()));
            }
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }
    }

    struct Fixture {
        embedder: Arc<FakeEmbedder>,
        search: Arc<FakeSearch>,
        generator: Arc<FakeGenerator>,
        log: Arc<RecordingLog>,
        pipeline: QaPipeline,
    }

    fn fixture(
        embedder: FakeEmbedder,
        search: FakeSearch,
        generator: FakeGenerator,
        log: RecordingLog,
    ) -> Fixture {
        let embedder = Arc::new(embedder);
        let search = Arc::new(search);
        let generator = Arc::new(generator);
        let log = Arc::new(log);
        let pipeline = QaPipeline::new(
            embedder.clone(),
            search.clone(),
            generator.clone(),
            log.clone(),
        );
        Fixture {
            embedder,
            search,
            generator,
            log,
            pipeline,
        }
    }

    #[tokio::test]
    async fn successful_run_returns_model_output_verbatim_and_logs_once() {
        let fx = fixture(
            FakeEmbedder::default(),
            FakeSearch {
                results: vec![
                    hit("c1", "Attendance", "Students must..."),
                    hit("c2", "Exceptions", "Medical leave..."),
                ],
                ..Default::default()
            },
            FakeGenerator {
                output: "Students are required to maintain...".into(),
                ..Default::default()
            },
            RecordingLog::default(),
        );

        let out = fx
            .pipeline
            .handle("What is the attendance policy?", "user-42")
            .await
            .unwrap();

        assert_eq!(out, "Students are required to maintain...");

        let entries = fx.log.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, "user-42");
        assert_eq!(entries[0].query, "What is the attendance policy?");
        assert_eq!(entries[0].output, "Students are required to maintain...");

        // Both docs reached the prompt, in ranking order.
        let prompt = fx.generator.last_prompt.lock().unwrap().clone().unwrap();
        let i1 = prompt.find("c1").unwrap();
        let i2 = prompt.find("c2").unwrap();
        assert!(i1 < i2);
    }

    #[tokio::test]
    async fn empty_search_results_still_reach_generation() {
        let fx = fixture(
            FakeEmbedder::default(),
            FakeSearch::default(),
            FakeGenerator {
                output: "No matching policy found.".into(),
                ..Default::default()
            },
            RecordingLog::default(),
        );

        let out = fx.pipeline.handle("anything", "u").await.unwrap();

        assert_eq!(out, "No matching policy found.");
        assert_eq!(fx.generator.calls.load(Ordering::SeqCst), 1);
        let prompt = fx.generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("docs: []"));
    }

    #[tokio::test]
    async fn embedding_failure_short_circuits_everything() {
        let fx = fixture(
            FakeEmbedder {
                fail: true,
                ..Default::default()
            },
            FakeSearch::default(),
            FakeGenerator::default(),
            RecordingLog::default(),
        );

        let err = fx.pipeline.handle("q", "u").await.unwrap_err();

        assert!(matches!(err, QaError::Embedding(_)));
        assert_eq!(fx.embedder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fx.search.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fx.generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fx.log.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_failure_stops_before_generation() {
        let fx = fixture(
            FakeEmbedder::default(),
            FakeSearch {
                fail: true,
                ..Default::default()
            },
            FakeGenerator::default(),
            RecordingLog::default(),
        );

        let err = fx.pipeline.handle("q", "u").await.unwrap_err();

        assert!(matches!(err, QaError::Search(_)));
        assert_eq!(fx.generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fx.log.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn generation_failure_writes_no_log_entry() {
        let fx = fixture(
            FakeEmbedder::default(),
            FakeSearch::default(),
            FakeGenerator {
                fail: true,
                ..Default::default()
            },
            RecordingLog::default(),
        );

        let err = fx.pipeline.handle("q", "u").await.unwrap_err();

        assert!(matches!(err, QaError::Generation(_)));
        assert_eq!(fx.log.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn log_failure_discards_the_computed_answer() {
        let fx = fixture(
            FakeEmbedder::default(),
            FakeSearch::default(),
            FakeGenerator {
                output: "a perfectly good answer".into(),
                ..Default::default()
            },
            RecordingLog {
                fail: true,
                ..Default::default()
            },
        );

        // The answer was generated, but the caller still sees a failure.
        let err = fx.pipeline.handle("q", "u").await.unwrap_err();

        assert!(matches!(err, QaError::LogPersistence(_)));
        assert_eq!(fx.generator.calls.load(Ordering::SeqCst), 1);
        assert!(fx.log.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_model_output_is_accepted_and_logged() {
        let fx = fixture(
            FakeEmbedder::default(),
            FakeSearch::default(),
            FakeGenerator::default(), // output = ""
            RecordingLog::default(),
        );

        let out = fx.pipeline.handle("q", "u").await.unwrap();

        assert_eq!(out, "");
        assert_eq!(fx.log.entries.lock().unwrap().len(), 1);
    }
}
