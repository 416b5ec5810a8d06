use std::sync::Arc;

use article_store::{ArticleStore, StoreConfig};
use llm_service::{
    LlmModelConfig, LlmProvider, LlmServiceProfiles,
    error_handler::{env_opt_u64, must_env},
};
use qa_chain::{AnswerChain, QueryParser, SessionStore};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Vector store adapter over the hosted article collection.
    pub store: Arc<ArticleStore>,
    /// Model roles: generation, embedding, rerank.
    pub profiles: Arc<LlmServiceProfiles>,
    /// Answer synthesis chain.
    pub chain: AnswerChain,
    /// Query structuring parser (chat endpoints).
    pub parser: QueryParser,
    /// Session-keyed conversation memory.
    pub sessions: SessionStore,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// Missing required credentials (`OPENAI_API_KEY`, `COHERE_API_KEY`,
    /// `QDRANT_URL`) are fatal here, before the server binds.
    pub fn from_env() -> Result<Self, AppError> {
        let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?;

        let generation = LlmModelConfig {
            provider: LlmProvider::OpenAi,
            model: env_or("OPENAI_MODEL", "gpt-3.5-turbo"),
            endpoint: env_or("OPENAI_ENDPOINT", "https://api.openai.com"),
            api_key: Some(must_env("OPENAI_API_KEY")?),
            max_tokens: None,
            // Deterministic answers over retrieved context.
            temperature: Some(0.0),
            top_p: None,
            timeout_secs,
        };

        let embedding = LlmModelConfig {
            provider: LlmProvider::Cohere,
            model: env_or("COHERE_EMBED_MODEL", "embed-multilingual-v2.0"),
            endpoint: env_or("COHERE_ENDPOINT", "https://api.cohere.ai"),
            api_key: Some(must_env("COHERE_API_KEY")?),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs,
        };
        let rerank = LlmModelConfig {
            model: env_or("COHERE_RERANK_MODEL", "rerank-multilingual-v2.0"),
            ..embedding.clone()
        };

        let profiles = Arc::new(LlmServiceProfiles::new(generation, embedding, rerank)?);

        let mut store_cfg = StoreConfig::new_default(
            must_env("QDRANT_URL")?,
            env_or("QDRANT_COLLECTION", "articles"),
        );
        store_cfg.qdrant_api_key = std::env::var("QDRANT_API_KEY").ok();
        if let Some(t) = env_opt_u64("QDRANT_TIMEOUT_SECS")? {
            store_cfg.timeout_secs = t;
        }
        let store = Arc::new(ArticleStore::new(&store_cfg, profiles.clone())?);

        Ok(Self {
            chain: AnswerChain::new(profiles.clone()),
            parser: QueryParser::new(profiles.clone()),
            sessions: SessionStore::new(),
            store,
            profiles,
        })
    }
}

fn env_or(key: &str, dflt: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| dflt.to_string())
}
