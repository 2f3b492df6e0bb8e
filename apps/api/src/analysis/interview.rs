//! Interview preparation: free-text generation, returned verbatim.

use tracing::info;

use crate::analysis::prompts::{
    fill_template, INTERVIEW_EXCERPT_CHARS, INTERVIEW_PROMPT_TEMPLATE, INTERVIEW_SYSTEM,
};
use crate::document::Transcript;
use crate::llm_client::prompts::{DEFAULT_TEMPERATURE, PLAIN_TEXT_INSTRUCTION};
use crate::llm_client::{CompletionRequest, LlmError, ReasoningService};

/// Generates interview questions and topics tailored to the resume and JD.
/// The reply is opaque text; it is not parsed.
pub async fn generate_interview_prep(
    reasoning: &dyn ReasoningService,
    transcript: &Transcript,
    job_description: &str,
) -> Result<String, LlmError> {
    let prompt = format!(
        "{}\n\n{PLAIN_TEXT_INSTRUCTION}",
        fill_template(
            INTERVIEW_PROMPT_TEMPLATE,
            transcript.excerpt(INTERVIEW_EXCERPT_CHARS),
            job_description,
        )
    );

    let text = reasoning
        .complete(CompletionRequest {
            system: INTERVIEW_SYSTEM,
            prompt: &prompt,
            temperature: DEFAULT_TEMPERATURE,
        })
        .await?;

    info!("Interview prep generated ({} chars)", text.chars().count());
    Ok(text)
}
