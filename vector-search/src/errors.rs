//! Unified error type for the vector-search crate.

use thiserror::Error;

/// Errors produced by the vector search module.
#[derive(Debug, Error)]
pub enum VectorSearchError {
    /// Required environment variable is missing.
    #[error("missing env variable: {key}")]
    EnvMissing { key: String },

    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport / client error from Qdrant.
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
