//! Locating JSON objects inside free-form model output.
//!
//! Models wrap JSON in prose, code fences or both. Stage one is a pure scan
//! for balanced `{...}` spans (string- and escape-aware); stage two parses the
//! first candidate that is a valid JSON object.

use serde::de::DeserializeOwned;

use super::LlmError;

/// Balanced `{...}` spans in order of their opening brace.
pub fn json_object_candidates(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.char_indices()
        .filter(|(_, c)| *c == '{')
        .filter_map(move |(start, _)| balanced_span(text, start))
}

/// The first balanced `{...}` span, if any.
pub fn extract_json_span(text: &str) -> Option<&str> {
    json_object_candidates(text).next()
}

/// Parses the first candidate span that is a JSON object into `T`.
///
/// Fails with `NoJsonObject` when no span is valid JSON, or `Parse` when the
/// object does not have the expected shape.
pub fn parse_json_object<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let value = json_object_candidates(text)
        .find_map(|span| serde_json::from_str::<serde_json::Value>(span).ok())
        .filter(|value| value.is_object())
        .ok_or(LlmError::NoJsonObject)?;

    serde_json::from_value(value).map_err(LlmError::Parse)
}

fn balanced_span(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
