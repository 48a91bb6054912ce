//! Data types for vector-store interaction.

use serde::{Deserialize, Serialize};

/// A single indexed chunk returned by the similarity search,
/// ranked by similarity descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: f32,

    /// Unique chunk identifier within the index.
    pub chunk_id: String,
    /// Identifier of the source document the chunk was cut from.
    pub parent_id: String,
    /// The text snippet itself.
    pub chunk: String,
    /// Title of the source document.
    pub title: String,
}
