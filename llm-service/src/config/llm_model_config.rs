use crate::config::llm_provider::LlmProvider;

/// Configuration for a single hosted model invocation target.
///
/// One instance describes one (provider, model, endpoint) triple plus the
/// sampling and transport knobs that apply to it. The same struct is used
/// for all three roles (generation, embedding, rerank); fields that do not
/// apply to a role (e.g. `temperature` for embeddings) are simply `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The hosted provider behind this config.
    pub provider: LlmProvider,

    /// Model identifier string (e.g. `"gpt-3.5-turbo"`, `"rerank-multilingual-v2.0"`).
    pub model: String,

    /// API base endpoint (e.g. `"https://api.openai.com"`).
    pub endpoint: String,

    /// API key. Required for both providers used here.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds (falls back to 60 when unset).
    pub timeout_secs: Option<u64>,
}
