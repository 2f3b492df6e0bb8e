use std::sync::Arc;

use crate::analysis::fit_scoring::{FitScorer, KeywordFitScorer, LlmFitScorer, ScoringStrategy};
use crate::analysis::skill_matcher::SkillMatcher;
use crate::config::Config;
use crate::document::DocumentExtractor;
use crate::history::HistoryRepository;
use crate::llm_client::ReasoningService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only or internally synchronized.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: DocumentExtractor,
    pub reasoning: Arc<dyn ReasoningService>,
    pub keyword_scorer: Arc<KeywordFitScorer>,
    pub llm_scorer: Arc<LlmFitScorer>,
    pub history: Arc<dyn HistoryRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        extractor: DocumentExtractor,
        reasoning: Arc<dyn ReasoningService>,
        matcher: Arc<SkillMatcher>,
        history: Arc<dyn HistoryRepository>,
    ) -> Self {
        let keyword_scorer = Arc::new(KeywordFitScorer::new(matcher, config.jd_match_mode));
        let llm_scorer = Arc::new(LlmFitScorer::new(reasoning.clone()));
        Self {
            config,
            extractor,
            reasoning,
            keyword_scorer,
            llm_scorer,
            history,
        }
    }

    pub fn scorer(&self, strategy: ScoringStrategy) -> &dyn FitScorer {
        match strategy {
            ScoringStrategy::Deterministic => self.keyword_scorer.as_ref(),
            ScoringStrategy::AiAssisted => self.llm_scorer.as_ref(),
        }
    }
}
