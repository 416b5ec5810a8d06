//! POST /chat-no-history — structured query, two-stage retrieval, stateless
//! synthesis.

use std::sync::Arc;

use axum::{Json, extract::State};
use qa_chain::RerankingRetriever;
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::{
        chat_request::{ChatRequest, DEFAULT_K, DEFAULT_TOP_N},
        chat_response::ChatResponse,
    },
};

/// Handler: POST /chat-no-history
///
/// The answer language is extracted from the query text itself; repeated
/// calls share nothing.
pub async fn chat_no_history(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let k = body.k.unwrap_or(DEFAULT_K);
    let top_n = body.top_n.unwrap_or(DEFAULT_TOP_N);
    debug!(query = %body.query, k, top_n, "chat_no_history: start");

    let structured = state
        .parser
        .parse(&body.query)
        .await
        .inspect_err(|e| error!(error = %e, "chat_no_history: parse failed"))?;

    let retriever =
        RerankingRetriever::new(state.store.clone(), state.profiles.clone(), k, top_n);
    let result = state
        .chain
        .answer(&retriever, &structured.question, &structured.language)
        .await
        .inspect_err(|e| error!(error = %e, "chat_no_history: failed"))?;

    Ok(Json(ChatResponse {
        search_result: result.answer,
    }))
}
