//! Answer synthesis: retrieved context + rendered prompt + one generation call.

use std::sync::Arc;

use llm_service::LlmServiceProfiles;
use serde::Serialize;
use tracing::debug;

use crate::error::ChainError;
use crate::memory::ConversationWindow;
use crate::prompt;
use crate::retriever::DocumentRetriever;

/// Source metadata attached to a synthesized answer.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

/// A synthesized answer plus the sources that grounded it.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// The answer synthesis chain.
///
/// Stateless between invocations; the conversational variant takes the
/// caller's window explicitly and never stores it.
pub struct AnswerChain {
    profiles: Arc<LlmServiceProfiles>,
    max_ctx_chars: usize,
}

impl AnswerChain {
    pub fn new(profiles: Arc<LlmServiceProfiles>) -> Self {
        Self {
            profiles,
            max_ctx_chars: prompt::DEFAULT_MAX_CTX_CHARS,
        }
    }

    /// Stateless mode: retrieve, render, one generation call.
    ///
    /// # Errors
    /// Retrieval/rerank errors propagate from the retriever; a failed
    /// generation call surfaces as [`ChainError::Synthesis`].
    pub async fn answer(
        &self,
        retriever: &dyn DocumentRetriever,
        question: &str,
        language: &str,
    ) -> Result<SearchResult, ChainError> {
        let docs = retriever.retrieve(question).await?;
        debug!(docs = docs.len(), language, "synthesizing answer");

        let user_prompt = prompt::build_answer_prompt(question, language, &docs, self.max_ctx_chars);
        let answer = self
            .profiles
            .generate(&user_prompt, Some(prompt::ANSWER_SYSTEM))
            .await
            .map_err(ChainError::Synthesis)?;

        Ok(SearchResult {
            answer: answer.trim().to_string(),
            sources: docs
                .iter()
                .map(|d| SourceRef {
                    title: d.title.clone(),
                    url: d.url.clone(),
                })
                .collect(),
        })
    }

    /// Conversational mode: additionally threads the bounded history into
    /// the prompt so the model can resolve follow-up references.
    ///
    /// The caller owns the window and appends the new turn after a
    /// successful synthesis.
    pub async fn answer_with_history(
        &self,
        retriever: &dyn DocumentRetriever,
        question: &str,
        language: &str,
        history: &ConversationWindow,
    ) -> Result<SearchResult, ChainError> {
        let docs = retriever.retrieve(question).await?;
        debug!(
            docs = docs.len(),
            turns = history.len(),
            language,
            "synthesizing answer with history"
        );

        let user_prompt = prompt::build_conversational_prompt(
            question,
            language,
            &docs,
            history,
            self.max_ctx_chars,
        );
        let answer = self
            .profiles
            .generate(&user_prompt, Some(prompt::ANSWER_SYSTEM))
            .await
            .map_err(ChainError::Synthesis)?;

        Ok(SearchResult {
            answer: answer.trim().to_string(),
            sources: docs
                .iter()
                .map(|d| SourceRef {
                    title: d.title.clone(),
                    url: d.url.clone(),
                })
                .collect(),
        })
    }
}
