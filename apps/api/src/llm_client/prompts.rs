// Shared prompt fragments.
// Each feature that calls the LLM keeps its own prompts.rs alongside it;
// this file holds the cross-cutting output-format instructions.

/// Appended to system prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with a single valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

/// Appended to prompts whose reply is shown to the user verbatim.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond in plain, human-readable text with clear headings and bullet points. \
    Do NOT return JSON. \
    Do NOT wrap any part of the answer in code blocks.";

/// Sampling temperature for every call: low enough to keep scores stable.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
