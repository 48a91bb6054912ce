//! Public application error type and its HTTP translation.
//!
//! Every pipeline failure collapses into the same generic 500 response
//! carrying a human-readable description; no structured error code is
//! exposed to callers. The full error is logged to the diagnostic stream
//! before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use qa_gateway::QaError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    // --- Pipeline ---
    #[error(transparent)]
    Qa(#[from] QaError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // 5xx — Config/Bind/Server are startup-only
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) | AppError::Qa(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            other => format!("An error occurred: {other}"),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(target: "api::error", error = %self, "request failed");
        }
        let body = ErrorBody {
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert Axum body rejections to `AppError` so malformed requests never
/// reach the pipeline.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn pipeline_errors_map_to_500_with_detail() {
        let err = AppError::from(QaError::Generation("model error".into()));
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(
            json["detail"],
            "An error occurred: generation provider error: model error"
        );
    }

    #[tokio::test]
    async fn log_failure_maps_to_the_same_500_shape() {
        let err = AppError::from(QaError::LogPersistence("store down".into()));
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(
            json["detail"],
            "An error occurred: log persistence error: store down"
        );
    }

    #[tokio::test]
    async fn bad_request_maps_to_400() {
        let err = AppError::BadRequest("missing field `query`".into());
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["detail"], "missing field `query`");
    }
}
