//! Typed error for the qa-gateway crate.
//!
//! Variants classify failures by origin, matching the pipeline steps. The
//! HTTP boundary flattens all of them into one generic failure response, so
//! the distinction only matters for operator diagnostics.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    /// The embedding provider call failed.
    #[error("embedding provider error: {0}")]
    Embedding(String),

    /// The vector search call failed.
    #[error("search provider error: {0}")]
    Search(String),

    /// The generative model call failed.
    #[error("generation provider error: {0}")]
    Generation(String),

    /// The interaction log write failed.
    #[error("log persistence error: {0}")]
    LogPersistence(String),
}
