//! POST /retrieve-compr — synthesize an answer from two-stage retrieval
//! (broad top-k, then rerank narrowing).

use std::sync::Arc;

use axum::{Json, extract::State};
use qa_chain::RerankingRetriever;
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::retrieve_compr::{
        retrieve_compr_request::{DEFAULT_K, DEFAULT_TOP_N, RetrieveComprRequest},
        retrieve_compr_response::RetrieveComprResponse,
    },
};

/// Handler: POST /retrieve-compr
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/retrieve-compr \
///   -H 'content-type: application/json' \
///   -d '{"query":"What is the capital of France?","k":9,"top_n":3}'
/// ```
pub async fn retrieve_compr(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RetrieveComprRequest>,
) -> AppResult<Json<RetrieveComprResponse>> {
    let k = body.k.unwrap_or(DEFAULT_K);
    let top_n = body.top_n.unwrap_or(DEFAULT_TOP_N);
    let language = body.language.unwrap_or_else(|| "english".to_string());
    debug!(query = %body.query, k, top_n, language = %language, "retrieve_compr: start");

    let retriever =
        RerankingRetriever::new(state.store.clone(), state.profiles.clone(), k, top_n);
    let search_result = state
        .chain
        .answer(&retriever, &body.query, &language)
        .await
        .inspect_err(|e| error!(error = %e, "retrieve_compr: failed"))?;

    Ok(Json(RetrieveComprResponse { search_result }))
}
