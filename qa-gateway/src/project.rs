//! Projection of raw search hits to the reduced field set fed to the LLM.

use serde::Serialize;
use vector_search::SearchResult;

/// The subset of a [`SearchResult`] exposed to the model as context.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedDoc {
    pub chunk_id: String,
    pub title: String,
    pub chunk: String,
}

/// Map each hit to a [`ProjectedDoc`], preserving order and count exactly.
///
/// 1:1 — no filtering, no deduplication.
pub fn project(hits: Vec<SearchResult>) -> Vec<ProjectedDoc> {
    hits.into_iter()
        .map(|h| ProjectedDoc {
            chunk_id: h.chunk_id,
            title: h.title,
            chunk: h.chunk,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(chunk_id: &str, title: &str, chunk: &str) -> SearchResult {
        SearchResult {
            score: 0.5,
            chunk_id: chunk_id.into(),
            parent_id: "parent".into(),
            chunk: chunk.into(),
            title: title.into(),
        }
    }

    #[test]
    fn projection_preserves_order_and_count() {
        let hits = vec![
            hit("c1", "Attendance", "Students must..."),
            hit("c2", "Exceptions", "Medical leave..."),
            hit("c3", "Appeals", "A student may appeal..."),
        ];

        let docs = project(hits.clone());

        assert_eq!(docs.len(), hits.len());
        for (doc, hit) in docs.iter().zip(hits.iter()) {
            assert_eq!(doc.chunk_id, hit.chunk_id);
            assert_eq!(doc.title, hit.title);
            assert_eq!(doc.chunk, hit.chunk);
        }
    }

    #[test]
    fn empty_input_projects_to_empty_output() {
        assert!(project(Vec::new()).is_empty());
    }
}
