use qa_chain::SearchResult;
use serde::Serialize;

/// Response payload for /retrieve.
#[derive(Debug, Serialize)]
pub struct RetrieveResponse {
    /// Synthesized answer plus source metadata.
    pub search_result: SearchResult,
}
