//! Qdrant-backed k-NN search over indexed policy chunks.
//!
//! Public API:
//! - [`SearchIndexConfig::from_env`]: typed runtime configuration.
//! - [`SearchIndex::connect`]: build the gRPC client once at startup.
//! - [`SearchIndex::knn_search`]: pure vector search returning ordered
//!   [`SearchResult`] rows with the `{chunk_id, parent_id, chunk, title}`
//!   payload selection.

pub mod config;
pub mod errors;
mod search_index;
pub mod types;

pub use config::SearchIndexConfig;
pub use errors::VectorSearchError;
pub use search_index::SearchIndex;
pub use types::SearchResult;
