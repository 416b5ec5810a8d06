use serde::Deserialize;

/// Default stage-one candidate count for the chat retriever.
pub const DEFAULT_K: u64 = 9;
/// Default post-rerank result count.
pub const DEFAULT_TOP_N: usize = 3;
/// Session used by /chat-with-history when the caller sends none.
pub const DEFAULT_SESSION: &str = "default";

/// Shared request payload for the chat endpoints.
///
/// The answer language is not a field here: it is auto-detected from the
/// query text by the structuring parser.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Freeform user input (question, possibly with a language directive).
    pub query: String,
    /// Optional override: stage-one candidate count.
    #[serde(default)]
    pub k: Option<u64>,
    /// Optional override: post-rerank result count.
    #[serde(default)]
    pub top_n: Option<usize>,
    /// Session identifier for history threading; only /chat-with-history
    /// reads it.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"query": "q"}"#).unwrap();
        assert!(req.session_id.is_none());

        let req: ChatRequest =
            serde_json::from_str(r#"{"query": "q", "session_id": "alice", "top_n": 2}"#).unwrap();
        assert_eq!(req.session_id.as_deref(), Some("alice"));
        assert_eq!(req.top_n, Some(2));
    }
}
