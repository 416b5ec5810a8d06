use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use article_store::RetrievalError;
use llm_service::LlmError;
use qa_chain::{ChainError, ParseError};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] LlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from pipeline stages with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // pipeline mapped
            AppError::Http { status, .. } => *status,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Convert pipeline failures to `AppError::Http` with a stable per-stage code.
///
/// Every stage failure is an upstream-service failure from the caller's
/// perspective, hence 502.
impl From<ChainError> for AppError {
    fn from(err: ChainError) -> Self {
        let code = match &err {
            ChainError::Retrieval(_) => "RETRIEVAL_FAILED",
            ChainError::Rerank(_) => "RERANK_FAILED",
            ChainError::Parse(_) => "PARSE_FAILED",
            ChainError::Synthesis(_) => "SYNTHESIS_FAILED",
        };
        AppError::Http {
            status: StatusCode::BAD_GATEWAY,
            code,
            message: err.to_string(),
        }
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        ChainError::Parse(err).into()
    }
}

impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        ChainError::Retrieval(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_errors_map_to_502_with_stage_code() {
        let cases: Vec<(AppError, &str)> = vec![
            (
                ChainError::Retrieval(RetrievalError::Config("x".into())).into(),
                "RETRIEVAL_FAILED",
            ),
            (ParseError::MissingJson.into(), "PARSE_FAILED"),
        ];
        for (err, code) in cases {
            assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = AppError::BadRequest("malformed body".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
