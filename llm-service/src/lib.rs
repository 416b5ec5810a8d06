//! Shared LLM service for the hosted model providers used by the backend.
//!
//! Three logical roles are managed: **generation** (OpenAI chat completions),
//! **embedding** and **rerank** (both Cohere). Construct [`service_profiles::LlmServiceProfiles`]
//! once, wrap it in `Arc`, and pass clones to dependents.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use service_profiles::LlmServiceProfiles;
pub use services::cohere_service::RerankHit;
