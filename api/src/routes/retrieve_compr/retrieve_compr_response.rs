use qa_chain::SearchResult;
use serde::Serialize;

/// Response payload for /retrieve-compr.
#[derive(Debug, Serialize)]
pub struct RetrieveComprResponse {
    /// Synthesized answer plus source metadata.
    pub search_result: SearchResult,
}
