//! Configuration layer: reads runtime settings from environment variables
//! and exposes a strongly typed config for the search index.

use serde::{Deserialize, Serialize};

use crate::errors::VectorSearchError;

/// Runtime configuration for the search index connection and queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndexConfig {
    /// gRPC URL for Qdrant (e.g., "http://localhost:6334").
    pub url: String,
    /// Optional API key for authenticated deployments.
    pub api_key: Option<String>,
    /// Collection holding the indexed policy chunks.
    pub collection: String,
    /// Default number of nearest neighbors to return.
    pub top_k: usize,
    /// Optional minimum score threshold for results.
    pub min_score: Option<f32>,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
    /// Expected embedding dimensionality; query vectors are validated
    /// against it when set.
    pub embedding_dim: Option<usize>,
}

impl SearchIndexConfig {
    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `QDRANT_URL` (default: "http://localhost:6334")
    /// - `QDRANT_API_KEY` (optional)
    /// - `QDRANT_COLLECTION` (default: "policy_chunks")
    /// - `SEARCH_TOP_K` (default: 5)
    /// - `SEARCH_MIN_SCORE` (optional)
    /// - `SEARCH_TIMEOUT_SECS` (default: 30)
    /// - `EMBEDDING_DIM` (optional; enables query vector validation)
    pub fn from_env() -> Result<Self, VectorSearchError> {
        let cfg = Self {
            url: std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6334".into()),
            api_key: std::env::var("QDRANT_API_KEY").ok().filter(|s| !s.is_empty()),
            collection: std::env::var("QDRANT_COLLECTION")
                .unwrap_or_else(|_| "policy_chunks".into()),
            top_k: read_usize_env("SEARCH_TOP_K").unwrap_or(5),
            min_score: read_f32_env("SEARCH_MIN_SCORE").ok(),
            timeout_secs: read_usize_env("SEARCH_TIMEOUT_SECS").unwrap_or(30) as u64,
            embedding_dim: read_usize_env("EMBEDDING_DIM").ok(),
        };

        if cfg.top_k == 0 {
            return Err(VectorSearchError::InvalidConfig(
                "SEARCH_TOP_K must be > 0".into(),
            ));
        }
        if let Some(dim) = cfg.embedding_dim {
            if dim == 0 {
                return Err(VectorSearchError::InvalidConfig(
                    "EMBEDDING_DIM must be > 0".into(),
                ));
            }
        }

        Ok(cfg)
    }
}

/// Read a `usize` from env, with error mapped to `VectorSearchError`.
fn read_usize_env(key: &str) -> Result<usize, VectorSearchError> {
    match std::env::var(key) {
        Ok(v) => v
            .parse::<usize>()
            .map_err(|_| VectorSearchError::EnvParse {
                key: key.into(),
                value: v,
            }),
        Err(_) => Err(VectorSearchError::EnvMissing { key: key.into() }),
    }
}

/// Read an optional `f32` from env.
fn read_f32_env(key: &str) -> Result<f32, VectorSearchError> {
    match std::env::var(key) {
        Ok(v) => v.parse::<f32>().map_err(|_| VectorSearchError::EnvParse {
            key: key.into(),
            value: v,
        }),
        Err(_) => Err(VectorSearchError::EnvMissing { key: key.into() }),
    }
}
