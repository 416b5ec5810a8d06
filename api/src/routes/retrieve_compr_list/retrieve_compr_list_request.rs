use serde::Deserialize;

/// Default stage-one candidate count for the two-stage retriever.
pub const DEFAULT_K: u64 = 9;
/// Default post-rerank result count.
pub const DEFAULT_TOP_N: usize = 3;

/// Request payload for /retrieve-compr-list.
#[derive(Debug, Deserialize)]
pub struct RetrieveComprListRequest {
    /// Natural language question.
    pub query: String,
    /// Optional override: stage-one candidate count.
    #[serde(default)]
    pub k: Option<u64>,
    /// Optional override: post-rerank result count.
    #[serde(default)]
    pub top_n: Option<usize>,
}
