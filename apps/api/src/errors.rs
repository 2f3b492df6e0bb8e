use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::ExtractionError;
use crate::llm_client::LlmError;
use crate::report::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailure(#[from] ExtractionError),

    #[error("Reasoning service failure: {0}")]
    UpstreamServiceFailure(String),

    #[error("Malformed reasoning response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Render failed: {0}")]
    RenderFailure(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        if err.is_malformed_response() {
            AppError::MalformedUpstreamResponse(err.to_string())
        } else {
            AppError::UpstreamServiceFailure(err.to_string())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl AppError {
    /// True for failures of the AI-assisted path that the deterministic path can stand in for.
    pub fn is_reasoning_failure(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamServiceFailure(_) | AppError::MalformedUpstreamResponse(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                format!("Upload a PDF or an image ({msg})"),
            ),
            AppError::ExtractionFailure(e) => {
                tracing::warn!("Extraction failure: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    format!("Could not read text from the document: {e}. Try re-uploading it."),
                )
            }
            AppError::UpstreamServiceFailure(msg) => {
                tracing::error!("Reasoning service failure: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_FAILED",
                    "Analysis failed. Please try again later.".to_string(),
                )
            }
            AppError::MalformedUpstreamResponse(msg) => {
                tracing::error!("Malformed reasoning response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_FAILED",
                    "Analysis failed. Please try again later.".to_string(),
                )
            }
            AppError::RenderFailure(e) => {
                tracing::error!("Render failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
                    "The report could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
