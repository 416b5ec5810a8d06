//! Typed errors for the orchestration layer.

use article_store::RetrievalError;
use llm_service::LlmError;
use thiserror::Error;

/// Failure of one step in the question-answering pipeline.
///
/// Each variant names the stage that failed; no stage retries and no stage
/// falls back to partial results.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Vector store search failed (unreachable store, embedding failure).
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    /// The rerank provider failed; the request fails rather than silently
    /// degrading to stage-one ordering.
    #[error("rerank failed: {0}")]
    Rerank(#[source] LlmError),

    /// Structured-query extraction failed.
    #[error("query parsing failed: {0}")]
    Parse(#[from] ParseError),

    /// The answer-synthesis generation call failed.
    #[error("answer synthesis failed: {0}")]
    Synthesis(#[source] LlmError),
}

/// Failure to extract a structured query from freeform input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The structuring generation call itself failed.
    #[error("structuring call failed: {0}")]
    Generation(#[source] LlmError),

    /// The model output contained no JSON object.
    #[error("no JSON object in model output")]
    MissingJson,

    /// The extracted JSON did not match the expected schema.
    #[error("model output failed schema validation: {0}")]
    Schema(#[from] serde_json::Error),

    /// The extracted question was empty or blank.
    #[error("extracted question is empty")]
    EmptyQuestion,
}
