//! Prompt builder: fixed system message + structured user block.
//!
//! The user block substitutes two named placeholders — the literal question
//! and the projected docs serialized as a JSON array of records — instead of
//! ad hoc string formatting, so document content cannot bleed into the
//! template structure.

use serde_json::{Value, json};

use crate::project::ProjectedDoc;

/// Fixed system instructions for policy answers.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant specializing in educational policies. \
Provide the summary of the information in an elaborate manner.";

/// Build the final user prompt with the question and the ordered doc list.
///
/// The docs are serialized as a JSON array in ranking order; an empty hit
/// list renders as `[]` and is still a valid prompt.
pub fn render_user_prompt(question: &str, docs: &[ProjectedDoc]) -> String {
    let docs_json = Value::Array(
        docs.iter()
            .map(|d| {
                json!({
                    "chunk_id": d.chunk_id,
                    "title": d.title,
                    "chunk": d.chunk,
                })
            })
            .collect(),
    )
    .to_string();

    format!("Follow Up Input:\nquestion: {question}\ndocs: {docs_json}\n")
}
