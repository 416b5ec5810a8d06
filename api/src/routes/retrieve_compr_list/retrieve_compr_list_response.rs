use serde::Serialize;

/// Response payload for /retrieve-compr-list.
#[derive(Debug, Serialize)]
pub struct RetrieveComprListResponse {
    /// Stringified list of reranked documents, most relevant first.
    pub compressed_docs_list: String,
}
