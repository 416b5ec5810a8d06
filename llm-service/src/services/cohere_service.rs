//! Cohere service for embeddings and reranking.
//!
//! Thin client around the Cohere REST API:
//! - POST {endpoint}/v1/embed  — embedding retrieval (search queries)
//! - POST {endpoint}/v1/rerank — cross-encoder relevance scoring
//!
//! Constructor validation mirrors the OpenAI client: provider, API key and
//! endpoint scheme are checked up front, errors are normalized via
//! `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{LlmError, ProviderError, ProviderErrorKind, make_snippet},
};

/// One rerank verdict: which candidate, how relevant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankHit {
    /// Index into the candidate slice given to [`CohereService::rerank`].
    pub index: usize,
    /// Cross-encoder relevance score (higher = more relevant).
    pub score: f32,
}

/// Thin client for the Cohere API.
///
/// One instance serves one model config; the embedding and rerank roles use
/// separate instances with their respective model identifiers.
#[derive(Debug)]
pub struct CohereService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_embed: String,
    url_rerank: String,
}

impl CohereService {
    /// Creates a new [`CohereService`] from the given config.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Cohere
    /// - [`LlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`LlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        if cfg.provider != LlmProvider::Cohere {
            return Err(
                ProviderError::new(LlmProvider::Cohere, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::Cohere, ProviderErrorKind::MissingApiKey)
        })?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                LlmProvider::Cohere,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                ProviderError::new(
                    LlmProvider::Cohere,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_embed = format!("{}/v1/embed", base);
        let url_rerank = format!("{}/v1/rerank", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "CohereService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_embed,
            url_rerank,
        })
    }

    /// Retrieves a single embedding vector for a search query.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Provider`] with `Decode` / `EmptyEmbeddings` on bad payloads
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        let started = Instant::now();
        let body = EmbedRequest {
            model: &self.cfg.model,
            texts: vec![input],
            input_type: "search_query",
        };

        debug!(
            model = %self.cfg.model,
            input_len = input.len(),
            "POST {}", self.url_embed
        );

        let resp = self.client.post(&self.url_embed).json(&body).send().await?;

        if !resp.status().is_success() {
            return Err(self
                .status_error(resp, &self.url_embed, started, "/v1/embed")
                .await);
        }

        let out: EmbedResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                LlmProvider::Cohere,
                ProviderErrorKind::Decode(format!("serde error: {e}; expected `embeddings[0]`")),
            )
        })?;

        let first = out.embeddings.into_iter().next().ok_or_else(|| {
            ProviderError::new(LlmProvider::Cohere, ProviderErrorKind::EmptyEmbeddings)
        })?;

        info!(
            model = %self.cfg.model,
            dim = first.len(),
            latency_ms = started.elapsed().as_millis(),
            "embed completed"
        );

        Ok(first)
    }

    /// Scores `documents` against `query` and returns at most `top_n` hits,
    /// ordered by descending relevance.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Provider`] with `Decode` on bad payloads
    pub async fn rerank(
        &self,
        query: &str,
        documents: &[&str],
        top_n: usize,
    ) -> Result<Vec<RerankHit>, LlmError> {
        let started = Instant::now();
        let body = RerankRequest {
            model: &self.cfg.model,
            query,
            documents,
            top_n,
        };

        debug!(
            model = %self.cfg.model,
            candidates = documents.len(),
            top_n,
            "POST {}", self.url_rerank
        );

        let resp = self
            .client
            .post(&self.url_rerank)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(self
                .status_error(resp, &self.url_rerank, started, "/v1/rerank")
                .await);
        }

        let out: RerankResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                LlmProvider::Cohere,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `results[].relevance_score`"
                )),
            )
        })?;

        let hits = out
            .results
            .into_iter()
            .map(|r| RerankHit {
                index: r.index,
                score: r.relevance_score,
            })
            .collect::<Vec<_>>();

        info!(
            model = %self.cfg.model,
            hits = hits.len(),
            latency_ms = started.elapsed().as_millis(),
            "rerank completed"
        );

        Ok(hits)
    }

    async fn status_error(
        &self,
        resp: reqwest::Response,
        url: &str,
        started: Instant,
        what: &str,
    ) -> LlmError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let snippet = make_snippet(&text);

        error!(
            %status,
            %url,
            %snippet,
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "Cohere {what} returned non-success status"
        );

        ProviderError::new(
            LlmProvider::Cohere,
            ProviderErrorKind::HttpStatus {
                status,
                url: url.to_string(),
                snippet,
            },
        )
        .into()
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/embed`.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: Vec<&'a str>,
    input_type: &'a str,
}

/// Response body for `/v1/embed`.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Request body for `/v1/rerank`.
#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [&'a str],
    top_n: usize,
}

/// Response body for `/v1/rerank`.
#[derive(Debug, Deserialize)]
struct RerankResponse {
    results: Vec<RerankResultItem>,
}

#[derive(Debug, Deserialize)]
struct RerankResultItem {
    index: usize,
    relevance_score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(endpoint: &str, key: Option<&str>) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Cohere,
            model: "rerank-multilingual-v2.0".into(),
            endpoint: endpoint.into(),
            api_key: key.map(|s| s.to_string()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn constructor_validation() {
        assert!(CohereService::new(cfg("https://api.cohere.ai", Some("k"))).is_ok());
        assert!(CohereService::new(cfg("https://api.cohere.ai", None)).is_err());
        assert!(CohereService::new(cfg("ftp://api.cohere.ai", Some("k"))).is_err());
    }

    #[test]
    fn rerank_request_shape() {
        let docs = ["doc a", "doc b"];
        let body = RerankRequest {
            model: "rerank-multilingual-v2.0",
            query: "q",
            documents: &docs,
            top_n: 1,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["documents"][1], "doc b");
        assert_eq!(v["top_n"], 1);
    }

    #[test]
    fn rerank_response_decodes() {
        let raw = r#"{"id":"x","results":[{"index":1,"relevance_score":0.91},{"index":0,"relevance_score":0.2}]}"#;
        let out: RerankResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(out.results[0].index, 1);
        assert!(out.results[0].relevance_score > out.results[1].relevance_score);
    }
}
