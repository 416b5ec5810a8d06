//! Retriever seam between the chain and the stores.
//!
//! Two implementations: plain top-k search, and the two-stage composition
//! that fetches `k` candidates broadly and narrows them to `top_n` with the
//! remote cross-encoder.

use std::cmp::Ordering;
use std::sync::Arc;
use std::{future::Future, pin::Pin};

use article_store::{Article, ArticleStore};
use llm_service::{LlmServiceProfiles, RerankHit};
use tracing::debug;

use crate::error::ChainError;

/// Asynchronous document retriever.
///
/// Implement this trait to plug in another retrieval strategy; the chain
/// only sees the trait object.
pub trait DocumentRetriever: Send + Sync {
    /// Returns documents relevant to `query`, most relevant first.
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Article>, ChainError>> + Send + 'a>>;
}

/// Stage-one retriever: top-k nearest articles by embedding similarity.
pub struct StoreRetriever {
    store: Arc<ArticleStore>,
    k: u64,
}

impl StoreRetriever {
    pub fn new(store: Arc<ArticleStore>, k: u64) -> Self {
        Self { store, k }
    }
}

impl DocumentRetriever for StoreRetriever {
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Article>, ChainError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.store.search(query, self.k).await?) })
    }
}

/// Two-stage retriever: fetch `k` candidates, narrow to `top_n` by remote
/// cross-encoder relevance.
///
/// A rerank failure fails the retrieval; there is no fallback to stage-one
/// ordering.
pub struct RerankingRetriever {
    store: Arc<ArticleStore>,
    profiles: Arc<LlmServiceProfiles>,
    k: u64,
    top_n: usize,
}

impl RerankingRetriever {
    pub fn new(
        store: Arc<ArticleStore>,
        profiles: Arc<LlmServiceProfiles>,
        k: u64,
        top_n: usize,
    ) -> Self {
        Self {
            store,
            profiles,
            k,
            top_n,
        }
    }
}

impl DocumentRetriever for RerankingRetriever {
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Article>, ChainError>> + Send + 'a>> {
        Box::pin(async move {
            let candidates = self.store.search(query, self.k).await?;
            if candidates.is_empty() {
                return Ok(candidates);
            }

            let texts: Vec<&str> = candidates.iter().map(|a| a.text.as_str()).collect();
            let ranked = self
                .profiles
                .rerank(query, &texts, self.top_n)
                .await
                .map_err(ChainError::Rerank)?;

            debug!(
                candidates = texts.len(),
                ranked = ranked.len(),
                top_n = self.top_n,
                "rerank narrowing"
            );

            Ok(apply_ranking(candidates, &ranked, self.top_n))
        })
    }
}

/// Reorders `candidates` by descending rerank score, keeping at most `top_n`.
///
/// Out-of-range or duplicate indices from the provider are skipped.
fn apply_ranking(candidates: Vec<Article>, ranked: &[RerankHit], top_n: usize) -> Vec<Article> {
    let mut slots: Vec<Option<Article>> = candidates.into_iter().map(Some).collect();

    let mut order: Vec<&RerankHit> = ranked.iter().collect();
    order.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut out = Vec::with_capacity(top_n.min(slots.len()));
    for hit in order {
        if out.len() == top_n {
            break;
        }
        if let Some(doc) = slots.get_mut(hit.index).and_then(Option::take) {
            out.push(doc);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str) -> Article {
        Article {
            title: title.into(),
            url: format!("https://example.org/{title}"),
            text: format!("text of {title}"),
            views: 0,
            lang: "en".into(),
            distance: 0.5,
        }
    }

    #[test]
    fn ranking_reorders_and_truncates() {
        let candidates = vec![doc("a"), doc("b"), doc("c"), doc("d")];
        let ranked = vec![
            RerankHit { index: 2, score: 0.9 },
            RerankHit { index: 0, score: 0.7 },
            RerankHit { index: 3, score: 0.4 },
        ];
        let out = apply_ranking(candidates, &ranked, 2);
        let titles: Vec<&str> = out.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["c", "a"]);
    }

    #[test]
    fn ranking_skips_bad_indices() {
        let candidates = vec![doc("a"), doc("b")];
        let ranked = vec![
            RerankHit { index: 9, score: 0.9 },
            RerankHit { index: 1, score: 0.8 },
            RerankHit { index: 1, score: 0.3 },
        ];
        let out = apply_ranking(candidates, &ranked, 3);
        let titles: Vec<&str> = out.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["b"]);
    }

    #[test]
    fn empty_rerank_yields_empty() {
        let out = apply_ranking(vec![doc("a")], &[], 3);
        assert!(out.is_empty());
    }
}
