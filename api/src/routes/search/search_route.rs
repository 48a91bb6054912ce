//! POST /search — answers a policy question with RAG context.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::search::search_request::{SearchResponse, UserSearchRequest},
};

/// Handler: POST /search
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/search \
///   -H 'content-type: application/json' \
///   -d '{"query":"What is the attendance policy?","user_id":"u1"}'
/// ```
pub async fn search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserSearchRequest>, JsonRejection>,
) -> AppResult<Json<SearchResponse>> {
    // Malformed bodies are rejected here, before any provider call.
    let Json(body) = payload?;

    let output = state.pipeline.handle(&body.query, &body.user_id).await?;

    Ok(Json(SearchResponse { output }))
}
