// LLM prompt templates for resume assessment and interview preparation.
// Placeholders are substituted in a single pass, so inserted text is never rescanned.

/// Characters of resume text embedded in the assessment prompt.
pub const ASSESSMENT_EXCERPT_CHARS: usize = 4000;

/// Characters of resume text embedded in the interview-preparation prompt.
pub const INTERVIEW_EXCERPT_CHARS: usize = 2500;

pub const ASSESSMENT_SYSTEM: &str = "\
    You are an applicant tracking system (ATS) evaluator and technical recruiter. \
    Score resumes strictly and consistently against the job description you are given.";

/// Replace `{resume_text}` and `{job_description}` before sending.
pub const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"Evaluate the resume below against the job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return a JSON object with this EXACT schema (no extra fields):
{
  "atsScore": 78,
  "fitScore": 64,
  "skillStrength": {"python": 3, "docker": 1},
  "matchingSkills": ["python"],
  "missingSkills": ["kubernetes"]
}

Rules:
- atsScore: integer 0-100, how well the resume would pass an ATS keyword and formatting screen.
- fitScore: integer 0-100, how well the candidate's skills cover the job description.
  If the job description is empty, set fitScore to 0.
- skillStrength: lower-case skill name -> integer strength 0-10 based on evidence in the resume.
- matchingSkills: lower-case skills required by the job description and present in the resume.
- missingSkills: lower-case skills required by the job description and absent from the resume."#;

pub const INTERVIEW_SYSTEM: &str = "\
    You are an experienced technical interview coach preparing a candidate for a specific role.";

/// Replace `{resume_text}` and `{job_description}` before sending.
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"Prepare the candidate for interviews using their resume and the job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Produce exactly these four sections, each under its own heading, in this order:

TECHNICAL QUESTIONS (5)
BEHAVIORAL QUESTIONS (5)
SYSTEM DESIGN PROMPTS (3)
CODING TOPICS (5)

Write each item as a bullet point. Tailor every item to the resume and the role."#;

const RESUME_PLACEHOLDER: &str = "{resume_text}";
const JOB_DESCRIPTION_PLACEHOLDER: &str = "{job_description}";

/// Fills a template with a transcript excerpt and the job description.
/// Placeholder syntax inside either input is copied through untouched.
pub fn fill_template(template: &str, resume_text: &str, job_description: &str) -> String {
    let job_description = if job_description.trim().is_empty() {
        "(not provided)"
    } else {
        job_description
    };

    let mut filled =
        String::with_capacity(template.len() + resume_text.len() + job_description.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        filled.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(RESUME_PLACEHOLDER) {
            filled.push_str(resume_text);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(JOB_DESCRIPTION_PLACEHOLDER) {
            filled.push_str(job_description);
            rest = after;
        } else {
            filled.push('{');
            rest = &tail[1..];
        }
    }
    filled.push_str(rest);
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_embeds_both_inputs() {
        let prompt = fill_template(ASSESSMENT_PROMPT_TEMPLATE, "Rust dev", "Need Rust");
        assert!(prompt.contains("RESUME:\nRust dev"));
        assert!(prompt.contains("JOB DESCRIPTION:\nNeed Rust"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_empty_job_description_is_marked() {
        let prompt = fill_template(INTERVIEW_PROMPT_TEMPLATE, "Rust dev", "  ");
        assert!(prompt.contains("(not provided)"));
    }

    #[test]
    fn test_resume_text_with_placeholder_syntax_is_not_expanded_twice() {
        let prompt = fill_template(ASSESSMENT_PROMPT_TEMPLATE, "{job_description}", "JD");
        assert!(prompt.contains("RESUME:\n{job_description}"));
    }

    #[test]
    fn test_job_description_with_placeholder_syntax_is_kept_as_written() {
        let prompt = fill_template(
            ASSESSMENT_PROMPT_TEMPLATE,
            "SECRET_RESUME",
            "Need {resume_text} skills",
        );
        assert!(prompt.contains("JOB DESCRIPTION:\nNeed {resume_text} skills"));
        assert_eq!(prompt.matches("SECRET_RESUME").count(), 1);
    }

    #[test]
    fn test_literal_braces_in_template_survive() {
        let prompt = fill_template(ASSESSMENT_PROMPT_TEMPLATE, "r", "j");
        assert!(prompt.contains("\"skillStrength\": {\"python\": 3, \"docker\": 1}"));
    }

    #[test]
    fn test_interview_prompt_names_all_four_sections() {
        for heading in [
            "TECHNICAL QUESTIONS (5)",
            "BEHAVIORAL QUESTIONS (5)",
            "SYSTEM DESIGN PROMPTS (3)",
            "CODING TOPICS (5)",
        ] {
            assert!(INTERVIEW_PROMPT_TEMPLATE.contains(heading));
        }
    }
}
