//! POST /retrieve — synthesize an answer from plain top-k retrieval.

use std::sync::Arc;

use axum::{Json, extract::State};
use qa_chain::StoreRetriever;
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::retrieve::{retrieve_request::RetrieveRequest, retrieve_response::RetrieveResponse},
};

/// Retrieval breadth for the plain (non-reranked) retriever.
const DEFAULT_K: u64 = 4;

/// Handler: POST /retrieve
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/retrieve \
///   -H 'content-type: application/json' \
///   -d '{"query":"What is the capital of France?","language":"french"}'
/// ```
pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RetrieveRequest>,
) -> AppResult<Json<RetrieveResponse>> {
    let language = body.language.unwrap_or_else(|| "english".to_string());
    debug!(query = %body.query, language = %language, "retrieve: start");

    let retriever = StoreRetriever::new(state.store.clone(), DEFAULT_K);
    let search_result = state
        .chain
        .answer(&retriever, &body.query, &language)
        .await
        .inspect_err(|e| error!(error = %e, "retrieve: failed"))?;

    Ok(Json(RetrieveResponse { search_result }))
}
