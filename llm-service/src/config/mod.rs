pub mod llm_model_config;
pub mod role_config;
