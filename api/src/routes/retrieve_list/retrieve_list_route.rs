//! POST /retrieve-list — raw nearest-document listing, no synthesis.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::retrieve_list::{
        retrieve_list_request::{DEFAULT_K, RetrieveListRequest},
        retrieve_list_response::RetrieveListResponse,
    },
};

/// Handler: POST /retrieve-list
pub async fn retrieve_list(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RetrieveListRequest>,
) -> AppResult<Json<RetrieveListResponse>> {
    let k = body.k.unwrap_or(DEFAULT_K);
    debug!(query = %body.query, k, "retrieve_list: start");

    let docs = state
        .store
        .search(&body.query, k)
        .await
        .inspect_err(|e| error!(error = %e, "retrieve_list: search failed"))?;

    let docs_list = docs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n");

    debug!(hits = docs.len(), "retrieve_list: success");
    Ok(Json(RetrieveListResponse { docs_list }))
}
