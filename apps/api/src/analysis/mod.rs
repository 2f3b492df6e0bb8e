//! Resume analysis: skill matching, fit scoring and AI-assisted assessment.

pub mod ai_assessment;
pub mod fit_scoring;
pub mod handlers;
pub mod interview;
pub mod pipeline;
pub mod prompts;
pub mod skill_matcher;
