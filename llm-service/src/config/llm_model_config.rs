/// Configuration for one LLM role (chat or embedding).
///
/// The same shape serves both roles; fields that do not apply to a role are
/// simply left as `None` (e.g. sampling knobs for the embedding model).
///
/// # Fields
///
/// - `model`: model or deployment identifier (e.g. `"gpt-4o-mini"`).
/// - `endpoint`: base URL of the OpenAI-compatible API.
/// - `api_key`: bearer token; required by [`crate::OpenAiService::new`].
/// - `max_tokens`: maximum number of tokens to generate.
/// - `temperature`: sampling temperature.
/// - `top_p`: nucleus sampling cutoff.
/// - `frequency_penalty`: repetition penalty applied during generation.
/// - `timeout_secs`: per-request timeout in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// Inference endpoint base URL.
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Frequency penalty for generation.
    pub frequency_penalty: Option<f32>,

    /// Request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
