//! Unified error type for the crate.

use thiserror::Error;

/// Top-level error for article retrieval.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The query embedding could not be computed.
    #[error("embedding error: {0}")]
    Embedding(#[from] llm_service::LlmError),

    /// Vector store unreachable or the search failed (wrapped).
    #[error("vector store error: {0}")]
    VectorStore(String),
}
