//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::QueryRejection, Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::fit_scoring::{Analysis, FitScorer, ScoringStrategy};
use crate::analysis::interview::generate_interview_prep;
use crate::analysis::pipeline::{prepare_transcript, score_transcript};
use crate::errors::AppError;
use crate::models::upload::UploadForm;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default)]
    pub strategy: ScoringStrategy,
    /// Fall back to the deterministic scorer when the AI-assisted one fails.
    #[serde(default)]
    pub fallback: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub analysis: Analysis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    pub success: bool,
    pub interview_prep: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload (`resume`, optional `jobDescription`). Scores with the
/// requested strategy; `?fallback=true` downgrades reasoning failures to a
/// deterministic result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Query(query) = query?;
    let form = UploadForm::from_multipart(multipart, state.config.max_upload_bytes).await?;
    let transcript = prepare_transcript(&state.extractor, form.document).await?;
    info!(
        "Extracted {} characters from {:?}; scoring with {:?} (job description supplied: {})",
        transcript.text.chars().count(),
        transcript.source_kind,
        query.strategy,
        !form.job_description.is_empty()
    );

    let primary = state.scorer(query.strategy);
    let fallback: Option<&dyn FitScorer> = match query.strategy {
        ScoringStrategy::AiAssisted if query.fallback => Some(state.keyword_scorer.as_ref()),
        _ => None,
    };

    let analysis =
        score_transcript(primary, fallback, &transcript, &form.job_description).await?;
    info!("Answering with {:?} analysis", analysis.strategy());

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}

/// POST /api/v1/interview
///
/// Same upload contract as analyze; returns free-form interview preparation text.
pub async fn handle_interview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<InterviewResponse>, AppError> {
    let form = UploadForm::from_multipart(multipart, state.config.max_upload_bytes).await?;
    let transcript = prepare_transcript(&state.extractor, form.document).await?;

    let interview_prep = generate_interview_prep(
        state.reasoning.as_ref(),
        &transcript,
        form.job_description.as_str(),
    )
    .await?;

    Ok(Json(InterviewResponse {
        success: true,
        interview_prep,
    }))
}
