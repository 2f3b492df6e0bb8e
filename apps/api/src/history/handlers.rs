use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::history::{HistoryRecord, NewHistoryRecord};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SaveHistoryResponse {
    pub success: bool,
    pub record: HistoryRecord,
}

/// POST /api/v1/history
pub async fn handle_save_history(
    State(state): State<AppState>,
    request: Result<Json<NewHistoryRecord>, JsonRejection>,
) -> Result<Json<SaveHistoryResponse>, AppError> {
    let Json(request) = request?;
    let record = state.history.create(request).await?;
    info!("Saved history record {}", record.id);
    Ok(Json(SaveHistoryResponse {
        success: true,
        record,
    }))
}

/// GET /api/v1/history
pub async fn handle_list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryRecord>>, AppError> {
    Ok(Json(state.history.list().await?))
}
