//! Qdrant helpers: connection lifecycle and top-K search using the
//! **modern** `qdrant_client` builder API.
//!
//! This module does **not** create embeddings — only DB I/O. The search is
//! pure vector k-NN: no lexical/text query channel is combined.

use std::time::Duration;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    PayloadIncludeSelector, ScoredPoint, SearchPointsBuilder,
    with_payload_selector::SelectorOptions,
};
use tracing::{debug, info};

use crate::config::SearchIndexConfig;
use crate::errors::VectorSearchError;
use crate::types::SearchResult;

/// Payload fields requested back from the index for every hit.
const SELECT_FIELDS: [&str; 4] = ["chunk_id", "parent_id", "chunk", "title"];

/// A connected search index: the Qdrant client plus its query settings.
///
/// Construct once at process startup and share read-only across requests.
pub struct SearchIndex {
    client: Qdrant,
    cfg: SearchIndexConfig,
}

impl SearchIndex {
    /// Establish a gRPC connection to Qdrant using `cfg.url`.
    ///
    /// This call **does not** touch any collections.
    ///
    /// # Errors
    /// Returns `VectorSearchError::Qdrant` if the client cannot be constructed.
    pub fn connect(cfg: SearchIndexConfig) -> Result<Self, VectorSearchError> {
        let mut builder =
            Qdrant::from_url(&cfg.url).timeout(Duration::from_secs(cfg.timeout_secs));
        if let Some(key) = &cfg.api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| VectorSearchError::Qdrant(format!("client build: {e}")))?;

        info!(
            target: "vector_search::connect",
            url = %cfg.url,
            collection = %cfg.collection,
            "search index client initialized"
        );

        Ok(Self { client, cfg })
    }

    /// Default neighbor count used when the caller does not override `k`.
    pub fn default_top_k(&self) -> usize {
        self.cfg.top_k
    }

    /// Run k-NN search for a **query vector** and return ordered hits.
    ///
    /// Requests only the `{chunk_id, parent_id, chunk, title}` payload
    /// fields back. An empty result set is not an error. If `min_score` is
    /// configured, it is passed to the request as `score_threshold`.
    ///
    /// # Errors
    /// - `InvalidConfig` if the query vector length mismatches `EMBEDDING_DIM`.
    /// - `Qdrant` on transport/server errors.
    pub async fn knn_search(
        &self,
        query_vec: Vec<f32>,
        k: Option<usize>,
    ) -> Result<Vec<SearchResult>, VectorSearchError> {
        if let Some(dim) = self.cfg.embedding_dim {
            if query_vec.len() != dim {
                return Err(VectorSearchError::InvalidConfig(format!(
                    "query vector length {} != EMBEDDING_DIM {}",
                    query_vec.len(),
                    dim
                )));
            }
        }

        let want = k.unwrap_or(self.cfg.top_k);

        let selector = SelectorOptions::Include(PayloadIncludeSelector {
            fields: SELECT_FIELDS.iter().map(|s| s.to_string()).collect(),
        });

        let mut builder =
            SearchPointsBuilder::new(&self.cfg.collection, query_vec, want as u64)
                .with_payload(selector);

        if let Some(t) = self.cfg.min_score {
            builder = builder.score_threshold(t);
        }

        let resp = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| VectorSearchError::Qdrant(format!("search_points: {e}")))?;

        let hits = resp
            .result
            .into_iter()
            .map(map_scored_point_to_result)
            .collect::<Vec<_>>();

        debug!(
            target: "vector_search::knn",
            hits = hits.len(),
            k = want,
            "knn_search finished"
        );

        Ok(hits)
    }
}

/// Map a `ScoredPoint` into our [`SearchResult`], extracting payload best-effort.
///
/// Missing or mistyped payload fields fall back to empty strings.
fn map_scored_point_to_result(sp: ScoredPoint) -> SearchResult {
    let mut chunk_id = String::new();
    let mut parent_id = String::new();
    let mut chunk = String::new();
    let mut title = String::new();

    if !sp.payload.is_empty() {
        if let Some(v) = sp.payload.get("chunk_id") {
            if let Some(s) = v.clone().into_json().as_str() {
                chunk_id = s.to_owned();
            }
        }
        if let Some(v) = sp.payload.get("parent_id") {
            if let Some(s) = v.clone().into_json().as_str() {
                parent_id = s.to_owned();
            }
        }
        if let Some(v) = sp.payload.get("chunk") {
            if let Some(s) = v.clone().into_json().as_str() {
                chunk = s.to_owned();
            }
        }
        if let Some(v) = sp.payload.get("title") {
            if let Some(s) = v.clone().into_json().as_str() {
                title = s.to_owned();
            }
        }
    }

    // Fall back to the point id when the payload lacks an explicit chunk_id.
    if chunk_id.is_empty() {
        if let Some(pid) = sp.id {
            chunk_id = match pid.point_id_options {
                Some(qdrant_client::qdrant::point_id::PointIdOptions::Uuid(s)) => s,
                Some(qdrant_client::qdrant::point_id::PointIdOptions::Num(n)) => n.to_string(),
                None => String::new(),
            };
        }
    }

    SearchResult {
        score: sp.score,
        chunk_id,
        parent_id,
        chunk,
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::{PointId, Value, point_id::PointIdOptions, value::Kind};
    use std::collections::HashMap;

    fn str_value(s: &str) -> Value {
        Value {
            kind: Some(Kind::StringValue(s.to_string())),
        }
    }

    fn payload(fields: &[(&str, &str)]) -> HashMap<String, Value> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), str_value(v)))
            .collect()
    }

    #[test]
    fn maps_full_payload() {
        let sp = ScoredPoint {
            score: 0.87,
            payload: payload(&[
                ("chunk_id", "c1"),
                ("parent_id", "p1"),
                ("chunk", "Students must..."),
                ("title", "Attendance"),
            ]),
            ..Default::default()
        };

        let hit = map_scored_point_to_result(sp);
        assert_eq!(hit.chunk_id, "c1");
        assert_eq!(hit.parent_id, "p1");
        assert_eq!(hit.chunk, "Students must...");
        assert_eq!(hit.title, "Attendance");
        assert!((hit.score - 0.87).abs() < 1e-6);
    }

    #[test]
    fn missing_fields_fall_back_to_empty_strings() {
        let sp = ScoredPoint {
            score: 0.5,
            payload: payload(&[("chunk_id", "c2")]),
            ..Default::default()
        };

        let hit = map_scored_point_to_result(sp);
        assert_eq!(hit.chunk_id, "c2");
        assert_eq!(hit.parent_id, "");
        assert_eq!(hit.chunk, "");
        assert_eq!(hit.title, "");
    }

    #[test]
    fn empty_payload_takes_point_id_as_chunk_id() {
        let sp = ScoredPoint {
            score: 0.3,
            id: Some(PointId {
                point_id_options: Some(PointIdOptions::Uuid("abc-123".into())),
            }),
            ..Default::default()
        };

        let hit = map_scored_point_to_result(sp);
        assert_eq!(hit.chunk_id, "abc-123");
    }
}
