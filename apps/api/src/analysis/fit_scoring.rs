//! Fit Scoring: pluggable, trait-based scorer that measures a resume transcript against a JD.
//!
//! `KeywordFitScorer` is pure Rust, deterministic and total over its inputs.
//! `LlmFitScorer` delegates to the reasoning service and can fail; callers that
//! want resilience fall back to the keyword scorer.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::ai_assessment::{assess_resume, AiAssessment};
use crate::analysis::skill_matcher::{SkillMatcher, SkillStrength};
use crate::document::Transcript;
use crate::errors::AppError;
use crate::llm_client::ReasoningService;
use crate::models::upload::JobDescription;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// How job-description skills are detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JdMatchMode {
    /// Plain case-insensitive containment ("javascript" also yields "java").
    #[default]
    Substring,
    /// Same whole-word rule the resume scan uses.
    WordBoundary,
}

/// Deterministic comparison of resume skills against JD skills.
///
/// `matching_skills ∪ missing_skills` is exactly the set of JD skills and the
/// two never overlap. Both keep lexicon order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitAssessment {
    pub fit_score: u8, // 0 – 100
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Full output of the deterministic strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub skills: Vec<String>,
    pub skill_strength: SkillStrength,
    #[serde(flatten)]
    pub fit: FitAssessment,
}

/// Which scorer produced an analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    #[default]
    Deterministic,
    AiAssisted,
}

/// Result of either scoring strategy; serialized with a `strategy` tag.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Analysis {
    Deterministic(KeywordAnalysis),
    AiAssisted(AiAssessment),
}

impl Analysis {
    pub fn strategy(&self) -> ScoringStrategy {
        match self {
            Analysis::Deterministic(_) => ScoringStrategy::Deterministic,
            Analysis::AiAssisted(_) => ScoringStrategy::AiAssisted,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The fit scorer trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
#[async_trait]
pub trait FitScorer: Send + Sync {
    fn strategy(&self) -> ScoringStrategy;

    async fn score(
        &self,
        transcript: &Transcript,
        job_description: &JobDescription,
    ) -> Result<Analysis, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordFitScorer
// ────────────────────────────────────────────────────────────────────────────

/// Lexicon-driven scorer. Fast, deterministic, no I/O, never fails.
pub struct KeywordFitScorer {
    matcher: Arc<SkillMatcher>,
    jd_mode: JdMatchMode,
}

impl KeywordFitScorer {
    pub fn new(matcher: Arc<SkillMatcher>, jd_mode: JdMatchMode) -> Self {
        Self { matcher, jd_mode }
    }

    pub fn analyze(&self, transcript_text: &str, job_description: &str) -> KeywordAnalysis {
        let skill_match = self.matcher.match_text(transcript_text);
        let fit = compute_fit(
            &skill_match.found_skills,
            job_description,
            &self.matcher,
            self.jd_mode,
        );

        KeywordAnalysis {
            skills: skill_match.found_skills,
            skill_strength: skill_match.skill_strength,
            fit,
        }
    }
}

#[async_trait]
impl FitScorer for KeywordFitScorer {
    fn strategy(&self) -> ScoringStrategy {
        ScoringStrategy::Deterministic
    }

    async fn score(
        &self,
        transcript: &Transcript,
        job_description: &JobDescription,
    ) -> Result<Analysis, AppError> {
        let analysis = self.analyze(&transcript.text, job_description.as_str());
        info!(
            "Keyword fit: {}/100 ({} skills found, {} matching, {} missing)",
            analysis.fit.fit_score,
            analysis.skills.len(),
            analysis.fit.matching_skills.len(),
            analysis.fit.missing_skills.len()
        );
        Ok(Analysis::Deterministic(analysis))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmFitScorer
// ────────────────────────────────────────────────────────────────────────────

/// ATS-style scorer backed by the reasoning service.
pub struct LlmFitScorer {
    reasoning: Arc<dyn ReasoningService>,
}

impl LlmFitScorer {
    pub fn new(reasoning: Arc<dyn ReasoningService>) -> Self {
        Self { reasoning }
    }
}

#[async_trait]
impl FitScorer for LlmFitScorer {
    fn strategy(&self) -> ScoringStrategy {
        ScoringStrategy::AiAssisted
    }

    async fn score(
        &self,
        transcript: &Transcript,
        job_description: &JobDescription,
    ) -> Result<Analysis, AppError> {
        let assessment =
            assess_resume(self.reasoning.as_ref(), transcript, job_description.as_str()).await?;
        info!(
            "AI assessment: ats={:?} fit={:?}",
            assessment.ats_score, assessment.fit_score
        );
        Ok(Analysis::AiAssisted(assessment))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword fit algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Compares `found_skills` against the lexicon skills mentioned in `job_description`.
///
/// fit_score = round(100 × |matching| / |jd_skills|), or 0 when the JD names no skills.
pub fn compute_fit(
    found_skills: &[String],
    job_description: &str,
    matcher: &SkillMatcher,
    mode: JdMatchMode,
) -> FitAssessment {
    let jd_text = job_description.to_lowercase();
    let jd_skills: Vec<&str> = matcher
        .lexicon()
        .filter(|skill| match mode {
            JdMatchMode::Substring => jd_text.contains(skill),
            JdMatchMode::WordBoundary => matcher.contains_word(skill, &jd_text),
        })
        .collect();

    let (matching_skills, missing_skills): (Vec<String>, Vec<String>) = jd_skills
        .iter()
        .map(|s| s.to_string())
        .partition(|skill| found_skills.contains(skill));

    FitAssessment {
        fit_score: percentage(matching_skills.len(), jd_skills.len()),
        matching_skills,
        missing_skills,
    }
}

/// Rounds half up, matching the scores existing clients already display.
fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    ((200 * part + whole) / (2 * whole)) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
