use serde::Deserialize;

/// Default retrieval breadth for /retrieve-list.
pub const DEFAULT_K: u64 = 4;

/// Request payload for /retrieve-list.
#[derive(Debug, Deserialize)]
pub struct RetrieveListRequest {
    /// Natural language question.
    pub query: String,
    /// Optional override: number of nearest documents to return.
    #[serde(default)]
    pub k: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_is_optional() {
        let req: RetrieveListRequest = serde_json::from_str(r#"{"query": "q"}"#).unwrap();
        assert!(req.k.is_none());

        let req: RetrieveListRequest = serde_json::from_str(r#"{"query": "q", "k": 7}"#).unwrap();
        assert_eq!(req.k, Some(7));
    }
}
