//! Shared LLM service with three active roles: `generation`, `embedding`,
//! and `rerank`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//! - Clients for all three roles are built at construction time, so a broken
//!   credential or endpoint fails at startup instead of on the first request.

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::Arc,
};

use tokio::sync::RwLock;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::LlmError,
    services::{
        cohere_service::{CohereService, RerankHit},
        open_ai_service::OpenAiService,
    },
};

/// Shared service that manages the three model roles used by the backend:
/// **generation** (OpenAI), **embedding** and **rerank** (Cohere).
pub struct LlmServiceProfiles {
    generation: LlmModelConfig,
    embedding: LlmModelConfig,
    rerank: LlmModelConfig,

    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,
    cohere: RwLock<HashMap<ClientKey, Arc<CohereService>>>,
}

impl LlmServiceProfiles {
    /// Creates a new service with the three role configs and eagerly builds
    /// their clients.
    ///
    /// # Errors
    /// Returns [`LlmError`] if any client fails constructor validation
    /// (wrong provider, missing key, bad endpoint).
    pub fn new(
        generation: LlmModelConfig,
        embedding: LlmModelConfig,
        rerank: LlmModelConfig,
    ) -> Result<Self, LlmError> {
        let mut openai = HashMap::new();
        openai.insert(
            ClientKey::from(&generation),
            Arc::new(OpenAiService::new(generation.clone())?),
        );

        let mut cohere = HashMap::new();
        cohere.insert(
            ClientKey::from(&embedding),
            Arc::new(CohereService::new(embedding.clone())?),
        );
        cohere
            .entry(ClientKey::from(&rerank))
            .or_insert(Arc::new(CohereService::new(rerank.clone())?));

        Ok(Self {
            generation,
            embedding,
            rerank,
            openai: RwLock::new(openai),
            cohere: RwLock::new(cohere),
        })
    }

    /// Generates text using the **generation** role.
    ///
    /// # Arguments
    /// - `prompt`: input text prompt.
    /// - `system`: optional system instruction.
    ///
    /// # Errors
    /// Returns [`LlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let cli = self.get_or_init_openai(&self.generation).await?;
        cli.generate(prompt, system).await
    }

    /// Computes a query embedding using the **embedding** role.
    ///
    /// # Errors
    /// Returns [`LlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        let cli = self.get_or_init_cohere(&self.embedding).await?;
        cli.embed(input).await
    }

    /// Scores `documents` against `query` using the **rerank** role and
    /// returns at most `top_n` hits by descending relevance.
    ///
    /// # Errors
    /// Returns [`LlmError`] if the rerank call fails.
    pub async fn rerank(
        &self,
        query: &str,
        documents: &[&str],
        top_n: usize,
    ) -> Result<Vec<RerankHit>, LlmError> {
        let cli = self.get_or_init_cohere(&self.rerank).await?;
        cli.rerank(query, documents, top_n).await
    }

    /// Returns references to the current role configs
    /// `(generation, embedding, rerank)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig, &LlmModelConfig) {
        (&self.generation, &self.embedding, &self.rerank)
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.openai.write().await;
        if let Some(cli) = w.get(&key) {
            return Ok(cli.clone());
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_cohere(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<CohereService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.cohere.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.cohere.write().await;
        if let Some(cli) = w.get(&key) {
            return Ok(cli.clone());
        }
        let cli = Arc::new(CohereService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, Eq)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

impl PartialEq for ClientKey {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider
            && self.endpoint == other.endpoint
            && self.model == other.model
            && self.api_key == other.api_key
            && self.timeout == other.timeout
    }
}

impl Hash for ClientKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.endpoint.hash(state);
        self.model.hash(state);
        if let Some(ref k) = self.api_key {
            k.hash(state);
        } else {
            0usize.hash(state);
        }
        self.timeout.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(provider: LlmProvider, model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider,
            model: model.into(),
            endpoint: "https://example.com".into(),
            api_key: Some("k".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn client_key_distinguishes_models() {
        let a = ClientKey::from(&cfg(LlmProvider::Cohere, "embed-multilingual-v2.0"));
        let b = ClientKey::from(&cfg(LlmProvider::Cohere, "rerank-multilingual-v2.0"));
        let a2 = ClientKey::from(&cfg(LlmProvider::Cohere, "embed-multilingual-v2.0"));
        assert!(a != b);
        assert!(a == a2);
    }

    #[test]
    fn startup_validation_rejects_mismatched_roles() {
        // Generation config pointing at Cohere must fail at construction.
        let res = LlmServiceProfiles::new(
            cfg(LlmProvider::Cohere, "gpt-3.5-turbo"),
            cfg(LlmProvider::Cohere, "embed-multilingual-v2.0"),
            cfg(LlmProvider::Cohere, "rerank-multilingual-v2.0"),
        );
        assert!(res.is_err());
    }
}
