//! Query-side retrieval: embed the query, search, map payloads.

use std::cmp::Ordering;
use std::sync::Arc;

use llm_service::LlmServiceProfiles;
use tracing::{debug, trace};

use crate::article::Article;
use crate::config::StoreConfig;
use crate::errors::RetrievalError;
use crate::qdrant_facade::QdrantFacade;

/// The Vector Store Adapter: `search(query, k)` over the article collection.
pub struct ArticleStore {
    facade: QdrantFacade,
    profiles: Arc<LlmServiceProfiles>,
}

impl ArticleStore {
    /// Creates the store from config plus the shared model profiles used for
    /// query embeddings.
    ///
    /// # Errors
    /// Returns `RetrievalError::Config` / `VectorStore` when the config is
    /// invalid or the client cannot be built.
    pub fn new(cfg: &StoreConfig, profiles: Arc<LlmServiceProfiles>) -> Result<Self, RetrievalError> {
        Ok(Self {
            facade: QdrantFacade::new(cfg)?,
            profiles,
        })
    }

    /// Returns the `k` nearest articles for `query`, ordered by ascending
    /// distance (most similar first).
    ///
    /// # Errors
    /// - `RetrievalError::Embedding` if the query embedding cannot be computed.
    /// - `RetrievalError::VectorStore` if the upstream search fails.
    pub async fn search(&self, query: &str, k: u64) -> Result<Vec<Article>, RetrievalError> {
        trace!(k, "article search: embedding query");
        let vector = self.profiles.embed(query).await?;

        let hits = self.facade.search(vector, k).await?;

        let mut out: Vec<Article> = hits
            .iter()
            .map(|(score, payload)| Article::from_payload(*score, payload))
            .collect();
        out.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });

        debug!(hits = out.len(), k, "article search completed");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hits_sort_ascending_by_distance() {
        // Same mapping the search path applies to facade output.
        let raw = vec![
            (0.7_f32, json!({"title": "B"})),
            (0.9_f32, json!({"title": "A"})),
            (0.8_f32, json!({"title": "C"})),
        ];
        let mut articles: Vec<Article> = raw
            .iter()
            .map(|(s, p)| Article::from_payload(*s, p))
            .collect();
        articles.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });

        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["A", "C", "B"]);
        assert!(articles.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}
