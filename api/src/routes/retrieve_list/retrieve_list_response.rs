use serde::Serialize;

/// Response payload for /retrieve-list.
#[derive(Debug, Serialize)]
pub struct RetrieveListResponse {
    /// Stringified list of matched documents, most similar first.
    pub docs_list: String,
}
