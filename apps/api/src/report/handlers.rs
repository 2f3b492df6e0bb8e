use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::report::stream::render_stream;
use crate::report::ReportPayload;

/// POST /api/v1/report
///
/// Renders the supplied analysis as a PDF and streams it as an attachment.
pub async fn handle_render_report(
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    payload.validate().map_err(AppError::Validation)?;

    let generated_at = Utc::now();
    let stream = render_stream(payload, generated_at).await?;
    let filename = format!("resume-report-{}.pdf", generated_at.format("%Y%m%d-%H%M%S"));
    info!("Streaming report {filename}");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}
