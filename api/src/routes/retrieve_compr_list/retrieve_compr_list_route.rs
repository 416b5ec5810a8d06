//! POST /retrieve-compr-list — reranked document listing, no synthesis.

use std::sync::Arc;

use axum::{Json, extract::State};
use qa_chain::{DocumentRetriever, RerankingRetriever};
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::retrieve_compr_list::{
        retrieve_compr_list_request::{DEFAULT_K, DEFAULT_TOP_N, RetrieveComprListRequest},
        retrieve_compr_list_response::RetrieveComprListResponse,
    },
};

/// Handler: POST /retrieve-compr-list
pub async fn retrieve_compr_list(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RetrieveComprListRequest>,
) -> AppResult<Json<RetrieveComprListResponse>> {
    let k = body.k.unwrap_or(DEFAULT_K);
    let top_n = body.top_n.unwrap_or(DEFAULT_TOP_N);
    debug!(query = %body.query, k, top_n, "retrieve_compr_list: start");

    let retriever =
        RerankingRetriever::new(state.store.clone(), state.profiles.clone(), k, top_n);
    let docs = retriever
        .retrieve(&body.query)
        .await
        .inspect_err(|e| error!(error = %e, "retrieve_compr_list: failed"))?;

    let compressed_docs_list = docs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n");

    debug!(hits = docs.len(), "retrieve_compr_list: success");
    Ok(Json(RetrieveComprListResponse {
        compressed_docs_list,
    }))
}
