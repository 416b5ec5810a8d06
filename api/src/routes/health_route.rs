//! GET / — deployment health check.

use axum::Json;
use serde_json::{Value, json};

/// Handler: GET /
///
/// The body is a legacy contract kept stable for existing deployment probes.
pub async fn health() -> Json<Value> {
    Json(json!({"LangChainApp": "Working"}))
}
