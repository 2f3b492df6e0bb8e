//! Report Synthesizer: renders caller-assembled analysis results into a PDF.
//!
//! Rendering runs in two steps: `layout::plan_report` is pure and decides every
//! line, style and page break; `pdf::write_pdf` turns that plan into bytes.
//! The synthesizer does not reconcile scores. It renders whatever it is given.

pub mod handlers;
pub mod layout;
pub mod pdf;
pub mod stream;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Union of deterministic and AI-derived fields. Every field is optional;
/// a missing field removes its section from the report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub ats_score: Option<u8>,
    pub fit_score: Option<u8>,
    pub skills: Option<Vec<String>>,
    pub skill_strength: Option<IndexMap<String, u32>>,
    pub matching_skills: Option<Vec<String>>,
    pub missing_skills: Option<Vec<String>>,
    pub interview_prep: Option<String>,
}

impl ReportPayload {
    pub fn validate(&self) -> Result<(), String> {
        for (name, score) in [("atsScore", self.ats_score), ("fitScore", self.fit_score)] {
            if score.is_some_and(|s| s > 100) {
                return Err(format!("{name} must be between 0 and 100"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF engine error: {0}")]
    Pdf(String),

    #[error("report sink closed: {0}")]
    Sink(#[from] std::io::Error),

    #[error("render worker aborted: {0}")]
    Worker(String),
}
