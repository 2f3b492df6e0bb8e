//! Skill Matcher: counts whole-word occurrences of lexicon skills in a transcript.

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

/// Canonical skill catalog, in reporting order.
pub const DEFAULT_SKILL_LEXICON: &[&str] = &[
    "java",
    "python",
    "flutter",
    "react",
    "node",
    "javascript",
    "sql",
    "aws",
    "docker",
    "mongodb",
    "kubernetes",
    "azure",
];

/// Occurrence count per lexicon skill, in lexicon order. Every skill is present.
pub type SkillStrength = IndexMap<String, u32>;

/// Result of scanning one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    pub skill_strength: SkillStrength,
    /// Skills with a non-zero count, in lexicon order.
    pub found_skills: Vec<String>,
}

/// Read-only lexicon with one pre-compiled whole-word pattern per skill.
/// Built once at startup and shared across requests.
#[derive(Debug)]
pub struct SkillMatcher {
    skills: Vec<(String, Regex)>,
}

impl SkillMatcher {
    pub fn new<S: AsRef<str>>(lexicon: &[S]) -> Result<Self, regex::Error> {
        let skills = lexicon
            .iter()
            .map(|skill| {
                let skill = skill.as_ref().to_lowercase();
                let pattern = Regex::new(&word_pattern(&skill))?;
                Ok((skill, pattern))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { skills })
    }

    pub fn with_default_lexicon() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_SKILL_LEXICON)
    }

    /// Lexicon tokens in order.
    pub fn lexicon(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|(skill, _)| skill.as_str())
    }

    /// Counts every lexicon skill in `text` after lower-casing it.
    pub fn match_text(&self, text: &str) -> SkillMatch {
        let text = text.to_lowercase();
        let mut skill_strength = SkillStrength::with_capacity(self.skills.len());
        let mut found_skills = Vec::new();

        for (skill, pattern) in &self.skills {
            let count = pattern.find_iter(&text).count() as u32;
            if count > 0 {
                found_skills.push(skill.clone());
            }
            skill_strength.insert(skill.clone(), count);
        }

        SkillMatch {
            skill_strength,
            found_skills,
        }
    }

    /// Whole-word containment check against already lower-cased text.
    pub fn contains_word(&self, skill: &str, lowered_text: &str) -> bool {
        self.skills
            .iter()
            .find(|(s, _)| s == skill)
            .map(|(_, pattern)| pattern.is_match(lowered_text))
            .unwrap_or(false)
    }
}

/// A token that starts or ends with a non-word character (e.g. "c++", ".net")
/// cannot use `\b` on that side, so it is anchored on "not a word char" instead.
fn word_pattern(skill: &str) -> String {
    let escaped = regex::escape(skill);
    let starts_word = skill.chars().next().map(is_word_char).unwrap_or(false);
    let ends_word = skill.chars().last().map(is_word_char).unwrap_or(false);
    let lead = if starts_word { r"\b" } else { r"(?:^|[^\w])" };
    let trail = if ends_word { r"\b" } else { r"(?:$|[^\w])" };
    format!("{lead}{escaped}{trail}")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SkillMatcher {
        SkillMatcher::with_default_lexicon().unwrap()
    }

    #[test]
    fn test_counts_case_insensitive_whole_words() {
        let result = matcher().match_text("Python, python and PYTHON. Also Docker.");
        assert_eq!(result.skill_strength["python"], 3);
        assert_eq!(result.skill_strength["docker"], 1);
        assert_eq!(result.found_skills, vec!["python", "docker"]);
    }

    #[test]
    fn test_javascript_does_not_count_as_java() {
        let result = matcher().match_text("Senior JavaScript developer");
        assert_eq!(result.skill_strength["java"], 0);
        assert_eq!(result.skill_strength["javascript"], 1);
        assert!(!result.found_skills.contains(&"java".to_string()));
    }

    #[test]
    fn test_java_and_javascript_counted_independently() {
        let result = matcher().match_text("Java backend, JavaScript frontend, java again");
        assert_eq!(result.skill_strength["java"], 2);
        assert_eq!(result.skill_strength["javascript"], 1);
    }

    #[test]
    fn test_punctuation_is_a_boundary_but_letters_are_not() {
        let result = matcher().match_text("node.js, (react), nodes, reactive, mysql");
        assert_eq!(result.skill_strength["node"], 1);
        assert_eq!(result.skill_strength["react"], 1);
        assert_eq!(result.skill_strength["sql"], 0);
    }

    #[test]
    fn test_every_lexicon_entry_is_present_and_found_iff_positive() {
        let result = matcher().match_text("Experienced React and Node developer, also knows SQL.");
        assert_eq!(result.skill_strength.len(), DEFAULT_SKILL_LEXICON.len());
        for (skill, count) in &result.skill_strength {
            assert_eq!(result.found_skills.contains(skill), *count > 0, "{skill}");
        }
    }

    #[test]
    fn test_found_skills_follow_lexicon_order() {
        let result = matcher().match_text("azure sql react java");
        assert_eq!(result.found_skills, vec!["java", "react", "sql", "azure"]);
        let keys: Vec<&str> = result.skill_strength.keys().map(String::as_str).collect();
        assert_eq!(keys, DEFAULT_SKILL_LEXICON);
    }

    #[test]
    fn test_matching_is_deterministic() {
        let m = matcher();
        let text = "Kubernetes, docker, AWS and MongoDB";
        assert_eq!(m.match_text(text), m.match_text(text));
    }

    #[test]
    fn test_empty_transcript_finds_nothing() {
        let result = matcher().match_text("");
        assert!(result.found_skills.is_empty());
        assert!(result.skill_strength.values().all(|c| *c == 0));
    }

    #[test]
    fn test_symbol_tokens_are_matched_without_word_boundaries() {
        let m = SkillMatcher::new(&["c++", ".net"]).unwrap();
        let result = m.match_text("Wrote C++ and .NET daily; C++ again.");
        assert_eq!(result.skill_strength["c++"], 2);
        assert_eq!(result.skill_strength[".net"], 1);
    }
}
