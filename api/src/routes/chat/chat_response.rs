use serde::Serialize;

/// Response payload for the chat endpoints.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Final model answer (plain text).
    pub search_result: String,
}
