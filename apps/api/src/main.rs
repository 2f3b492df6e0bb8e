mod analysis;
mod config;
mod document;
mod errors;
mod history;
mod llm_client;
mod models;
mod report;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::skill_matcher::SkillMatcher;
use crate::config::Config;
use crate::document::{DocumentExtractor, OcrTextExtractor, PdfTextExtractor};
use crate::history::InMemoryHistoryRepository;
use crate::llm_client::{LlmClient, LlmSettings};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize reasoning client
    let llm = LlmClient::new(LlmSettings::from(&config))
        .context("Failed to build reasoning service client")?;
    info!(
        "Reasoning client initialized (model: {}, timeout: {:?})",
        llm.model(),
        config.reasoning_timeout
    );

    // Initialize extractors
    let extractor = DocumentExtractor::new(
        Arc::new(PdfTextExtractor),
        Arc::new(
            OcrTextExtractor::new(config.ocr_binary.clone(), config.ocr_language.clone())
                .with_scratch_dir(config.ocr_scratch_dir.clone()),
        ),
    );
    info!(
        "OCR via '{}' (language: {})",
        config.ocr_binary, config.ocr_language
    );

    let matcher = SkillMatcher::with_default_lexicon().context("Invalid skill lexicon")?;
    info!(
        "Skill lexicon loaded ({} skills, JD matching: {:?})",
        matcher.lexicon().count(),
        config.jd_match_mode
    );

    // Build app state
    let state = AppState::new(
        config.clone(),
        extractor,
        Arc::new(llm),
        Arc::new(matcher),
        Arc::new(InMemoryHistoryRepository::with_capacity(
            config.history_capacity,
        )),
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
