use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dispatch::mock::MockRenderError;
use crate::dispatch::DispatchError;
use crate::summary::{ParseError, SchemaError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please enter a chat transcript.")]
    EmptyInput,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Error sending email: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("SMTP Error: {0}")]
    MockRender(#[from] MockRenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Parse(_) => (StatusCode::BAD_GATEWAY, "PARSE_ERROR"),
            AppError::Schema(_) => (StatusCode::BAD_GATEWAY, "SCHEMA_ERROR"),
            AppError::Llm(_) => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
            AppError::Dispatch(_) => (StatusCode::BAD_GATEWAY, "DISPATCH_ERROR"),
            AppError::MockRender(_) => (StatusCode::UNPROCESSABLE_ENTITY, "MOCK_RENDER_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// The unparseable LLM output, when the failure came from summary extraction.
    fn raw_output(&self) -> Option<&str> {
        match self {
            AppError::Parse(e) => Some(e.raw_output()),
            AppError::Schema(e) => Some(e.raw_output()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            AppError::EmptyInput | AppError::Validation(_) | AppError::NotFound(_) => {
                tracing::warn!("{code}: {}", self);
            }
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => tracing::error!("{code}: {}", self),
        }

        let message = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(raw) = self.raw_output() {
            error["raw_output"] = json!(raw);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
