//! OpenAI-compatible LLM client used by the policy QA backend.
//!
//! Two roles are configured independently from the environment:
//! - **chat** — answer generation via `/v1/chat/completions`
//! - **embedding** — query vectors via `/v1/embeddings`
//!
//! Construct one [`OpenAiService`] per role at process startup and share it
//! behind an `Arc`; the client keeps a preconfigured `reqwest::Client` with
//! auth headers and a timeout.

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::role_config::{config_chat, config_embedding};
pub use error_handler::{ConfigError, LlmServiceError};
pub use services::open_ai_service::OpenAiService;
