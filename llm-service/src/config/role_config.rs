//! Role configs loaded strictly from environment variables.
//!
//! Two roles are used by the QA pipeline:
//!
//! - **Chat**      → answer generation (fixed decoding parameters)
//! - **Embedding** → query vector generation
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_ENDPOINT` = base URL of the OpenAI-compatible API (mandatory)
//! - `LLM_API_KEY`  = bearer token (mandatory)
//! - `LLM_TIMEOUT_SECS` = optional per-request timeout (default 60)
//!
//! Chat:
//! - `LLM_CHAT_MODEL` = generation model identifier (mandatory)
//! - `LLM_MAX_TOKENS` = optional max tokens override (default 400)
//!
//! Embedding:
//! - `LLM_EMBEDDING_MODEL` = embedding model identifier (mandatory)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{LlmServiceError, env_opt_u32, env_opt_u64, must_env, validate_http_endpoint},
};

fn endpoint_and_key() -> Result<(String, String), LlmServiceError> {
    let endpoint = must_env("LLM_ENDPOINT")?;
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;
    let api_key = must_env("LLM_API_KEY")?;
    Ok((endpoint, api_key))
}

/// Constructs the config for the **chat** role.
///
/// Decoding parameters are fixed: `max_tokens = 400` (unless overridden via
/// `LLM_MAX_TOKENS`), `frequency_penalty = 1.0`, `temperature = 0.4`.
///
/// # Errors
/// Propagates [`LlmServiceError::Config`] for missing/invalid variables.
pub fn config_chat() -> Result<LlmModelConfig, LlmServiceError> {
    let (endpoint, api_key) = endpoint_and_key()?;
    let model = must_env("LLM_CHAT_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.or(Some(400));
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(60));

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.4),
        top_p: None,
        frequency_penalty: Some(1.0),
        timeout_secs,
    })
}

/// Constructs the config for the **embedding** role.
///
/// Sampling knobs do not apply to embeddings and stay `None`.
///
/// # Errors
/// Propagates [`LlmServiceError::Config`] for missing/invalid variables.
pub fn config_embedding() -> Result<LlmModelConfig, LlmServiceError> {
    let (endpoint, api_key) = endpoint_and_key()?;
    let model = must_env("LLM_EMBEDDING_MODEL")?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(60));

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: None,
        temperature: None,
        top_p: None,
        frequency_penalty: None,
        timeout_secs,
    })
}
