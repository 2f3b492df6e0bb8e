//! AI assessment: ATS-style scoring delegated to the reasoning service.

use indexmap::IndexMap;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::analysis::prompts::{
    fill_template, ASSESSMENT_EXCERPT_CHARS, ASSESSMENT_PROMPT_TEMPLATE, ASSESSMENT_SYSTEM,
};
use crate::document::Transcript;
use crate::llm_client::prompts::{DEFAULT_TEMPERATURE, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{call_json, CompletionRequest, LlmError, ReasoningService};

/// Structured assessment parsed from the model's reply.
///
/// Fields the model leaves out stay `None`; nothing is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAssessment {
    #[serde(
        default,
        deserialize_with = "deserialize_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub ats_score: Option<u8>,
    #[serde(
        default,
        deserialize_with = "deserialize_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub fit_score: Option<u8>,
    #[serde(
        default,
        deserialize_with = "deserialize_strength",
        skip_serializing_if = "Option::is_none"
    )]
    pub skill_strength: Option<IndexMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_prep: Option<String>,
}

/// Asks the reasoning service for a structured assessment of the resume.
pub async fn assess_resume(
    reasoning: &dyn ReasoningService,
    transcript: &Transcript,
    job_description: &str,
) -> Result<AiAssessment, LlmError> {
    let prompt = fill_template(
        ASSESSMENT_PROMPT_TEMPLATE,
        transcript.excerpt(ASSESSMENT_EXCERPT_CHARS),
        job_description,
    );
    let system = format!("{ASSESSMENT_SYSTEM} {JSON_ONLY_INSTRUCTION}");

    call_json::<AiAssessment>(
        reasoning,
        CompletionRequest {
            system: &system,
            prompt: &prompt,
            temperature: DEFAULT_TEMPERATURE,
        },
    )
    .await
}

/// Accepts any JSON number in 0–100 (rounded) or null.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(v) if v.is_finite() && (0.0..=100.0).contains(&v) => Ok(Some(v.round() as u8)),
        Some(v) => Err(D::Error::custom(format!("score {v} is outside 0-100"))),
    }
}

/// Accepts non-negative numbers per skill, rounded to whole counts.
fn deserialize_strength<'de, D>(deserializer: D) -> Result<Option<IndexMap<String, u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<IndexMap<String, f64>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    raw.into_iter()
        .map(|(skill, value)| {
            if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
                Ok((skill.to_lowercase(), value.round() as u32))
            } else {
                Err(D::Error::custom(format!(
                    "skill strength {value} for '{skill}' is not a non-negative number"
                )))
            }
        })
        .collect::<Result<IndexMap<_, _>, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::document::DocumentKind;
    use crate::llm_client::parse_json_object;

    /// Replays a canned reply and records the prompt it was given.
    struct Canned {
        /// `None` simulates a timed-out call.
        reply: Option<String>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ReasoningService for Canned {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
            *self.seen_prompt.lock().unwrap() = Some(request.prompt.to_string());
            assert!(request.system.contains("JSON"));
            self.reply.clone().ok_or(LlmError::Timeout)
        }
    }

    fn transcript(text: &str) -> Transcript {
        Transcript::new(text, DocumentKind::Pdf)
    }

    #[tokio::test]
    async fn test_fenced_reply_with_only_ats_score() {
        let service = Canned::ok("Sure! ```json\n{\"atsScore\":80}\n```");
        let assessment = assess_resume(&service, &transcript("Rust dev"), "Rust")
            .await
            .unwrap();

        assert_eq!(
            assessment,
            AiAssessment {
                ats_score: Some(80),
                ..Default::default()
            }
        );
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json, serde_json::json!({"atsScore": 80}));
    }

    #[tokio::test]
    async fn test_full_reply_is_parsed() {
        let service = Canned::ok(
            r#"Here is the evaluation:
{"atsScore": 71.6, "fitScore": 50, "skillStrength": {"Python": 3, "docker": 0},
 "matchingSkills": ["python"], "missingSkills": ["aws"]}
Let me know if you need more."#,
        );
        let assessment = assess_resume(&service, &transcript("Python"), "python aws")
            .await
            .unwrap();

        assert_eq!(assessment.ats_score, Some(72));
        assert_eq!(assessment.fit_score, Some(50));
        let strength = assessment.skill_strength.unwrap();
        assert_eq!(strength["python"], 3);
        assert_eq!(strength["docker"], 0);
        assert_eq!(assessment.matching_skills.unwrap(), vec!["python"]);
        assert_eq!(assessment.missing_skills.unwrap(), vec!["aws"]);
        assert!(assessment.interview_prep.is_none());
    }

    #[tokio::test]
    async fn test_reply_without_json_is_malformed() {
        let service = Canned::ok("I'm sorry, I can't evaluate this resume.");
        let err = assess_resume(&service, &transcript("x"), "y")
            .await
            .unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[tokio::test]
    async fn test_upstream_failure_passes_through() {
        let service = Canned {
            reply: None,
            seen_prompt: Mutex::new(None),
        };
        let err = assess_resume(&service, &transcript("x"), "y")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Timeout));
        assert!(!err.is_malformed_response());
    }

    #[tokio::test]
    async fn test_prompt_embeds_bounded_excerpt() {
        let long_resume = format!("{}TAIL_MARKER", "a".repeat(ASSESSMENT_EXCERPT_CHARS));
        let service = Canned::ok("{}");
        let assessment = assess_resume(&service, &transcript(&long_resume), "Need Rust")
            .await
            .unwrap();

        assert_eq!(assessment, AiAssessment::default());
        let prompt = service.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Need Rust"));
        assert!(!prompt.contains("TAIL_MARKER"));
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let err = parse_json_object::<AiAssessment>("{\"atsScore\": 140}").unwrap_err();
        assert!(err.is_malformed_response());
        let err = parse_json_object::<AiAssessment>("{\"fitScore\": -3}").unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn test_null_score_counts_as_absent() {
        let assessment = parse_json_object::<AiAssessment>("{\"atsScore\": null}").unwrap();
        assert_eq!(assessment.ats_score, None);
    }

    #[test]
    fn test_negative_strength_is_rejected() {
        let err =
            parse_json_object::<AiAssessment>("{\"skillStrength\": {\"rust\": -1}}").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }
}
