use serde::Deserialize;

/// Default stage-one candidate count for the two-stage retriever.
pub const DEFAULT_K: u64 = 9;
/// Default post-rerank result count.
pub const DEFAULT_TOP_N: usize = 3;

/// Request payload for /retrieve-compr.
#[derive(Debug, Deserialize)]
pub struct RetrieveComprRequest {
    /// Natural language question.
    pub query: String,
    /// Optional override: stage-one candidate count.
    #[serde(default)]
    pub k: Option<u64>,
    /// Optional override: post-rerank result count.
    #[serde(default)]
    pub top_n: Option<usize>,
    /// Answer language; defaults to "english" when omitted.
    #[serde(default)]
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_knobs_are_optional() {
        let req: RetrieveComprRequest = serde_json::from_str(r#"{"query": "q"}"#).unwrap();
        assert!(req.k.is_none());
        assert!(req.top_n.is_none());
        assert!(req.language.is_none());
    }
}
