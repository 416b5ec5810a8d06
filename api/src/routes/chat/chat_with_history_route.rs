//! POST /chat-with-history — structured query, two-stage retrieval,
//! session-scoped conversational synthesis.

use std::sync::Arc;

use axum::{Json, extract::State};
use qa_chain::RerankingRetriever;
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::{
        chat_request::{ChatRequest, DEFAULT_K, DEFAULT_SESSION, DEFAULT_TOP_N},
        chat_response::ChatResponse,
    },
};

/// Handler: POST /chat-with-history
///
/// History is keyed by `session_id` so concurrent conversations do not
/// interleave. The turn is recorded only after a successful synthesis.
pub async fn chat_with_history(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let k = body.k.unwrap_or(DEFAULT_K);
    let top_n = body.top_n.unwrap_or(DEFAULT_TOP_N);
    let session = body
        .session_id
        .clone()
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());
    debug!(query = %body.query, k, top_n, session = %session, "chat_with_history: start");

    let structured = state
        .parser
        .parse(&body.query)
        .await
        .inspect_err(|e| error!(error = %e, "chat_with_history: parse failed"))?;

    let retriever =
        RerankingRetriever::new(state.store.clone(), state.profiles.clone(), k, top_n);
    let window = state.sessions.window(&session).await;
    let result = state
        .chain
        .answer_with_history(&retriever, &structured.question, &structured.language, &window)
        .await
        .inspect_err(|e| error!(error = %e, "chat_with_history: failed"))?;

    state
        .sessions
        .append(&session, structured.question, result.answer.clone())
        .await;

    Ok(Json(ChatResponse {
        search_result: result.answer,
    }))
}
