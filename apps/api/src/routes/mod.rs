pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::history::handlers as history;
use crate::report::handlers as report;
use crate::state::AppState;

/// Room for multipart framing and the job description on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/api/v1/interview", post(analysis::handle_interview))
        // Report API
        .route("/api/v1/report", post(report::handle_render_report))
        // History API
        .route(
            "/api/v1/history",
            get(history::handle_list_history).post(history::handle_save_history),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
