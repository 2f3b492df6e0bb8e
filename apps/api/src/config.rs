use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::analysis::fit_scoring::JdMatchMode;
use crate::history::DEFAULT_HISTORY_CAPACITY;

const DEFAULT_REASONING_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_REASONING_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub reasoning_api_key: String,
    pub reasoning_base_url: String,
    pub reasoning_model: String,
    pub reasoning_timeout: Duration,
    pub app_referer: String,
    pub app_title: String,
    pub ocr_binary: String,
    pub ocr_language: String,
    /// Where uploads are staged for OCR. System temp dir when unset.
    pub ocr_scratch_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub history_capacity: usize,
    pub jd_match_mode: JdMatchMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            reasoning_api_key: require_env("OPENROUTER_API_KEY")?,
            reasoning_base_url: env_or("REASONING_BASE_URL", DEFAULT_REASONING_BASE_URL),
            reasoning_model: env_or("REASONING_MODEL", DEFAULT_REASONING_MODEL),
            reasoning_timeout: Duration::from_secs(
                env_or("REASONING_TIMEOUT_SECS", "60")
                    .parse::<u64>()
                    .context("REASONING_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            app_referer: env_or("APP_REFERER", "http://localhost:3000"),
            app_title: env_or("APP_TITLE", "AI Resume Analyzer"),
            ocr_binary: env_or("OCR_BINARY", "tesseract"),
            ocr_language: env_or("OCR_LANGUAGE", "eng"),
            ocr_scratch_dir: std::env::var("OCR_SCRATCH_DIR").ok().map(PathBuf::from),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            history_capacity: env_or("HISTORY_CAPACITY", &DEFAULT_HISTORY_CAPACITY.to_string())
                .parse::<usize>()
                .context("HISTORY_CAPACITY must be a record count")?,
            jd_match_mode: parse_jd_match_mode(&env_or("JD_SKILL_MATCHING", "substring"))?,
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults for in-process tests; no environment access.
    pub fn for_tests() -> Self {
        Config {
            reasoning_api_key: "test-key".to_string(),
            reasoning_base_url: "http://127.0.0.1:9".to_string(),
            reasoning_model: DEFAULT_REASONING_MODEL.to_string(),
            reasoning_timeout: Duration::from_secs(5),
            app_referer: "http://localhost:3000".to_string(),
            app_title: "AI Resume Analyzer".to_string(),
            ocr_binary: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            ocr_scratch_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            jd_match_mode: JdMatchMode::Substring,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_jd_match_mode(raw: &str) -> Result<JdMatchMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "substring" => Ok(JdMatchMode::Substring),
        "word_boundary" => Ok(JdMatchMode::WordBoundary),
        other => bail!("JD_SKILL_MATCHING must be 'substring' or 'word_boundary', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jd_match_mode_accepts_both_spellings_case_insensitively() {
        assert_eq!(parse_jd_match_mode("substring").unwrap(), JdMatchMode::Substring);
        assert_eq!(
            parse_jd_match_mode(" Word_Boundary ").unwrap(),
            JdMatchMode::WordBoundary
        );
    }

    #[test]
    fn test_jd_match_mode_rejects_unknown_value() {
        let err = parse_jd_match_mode("fuzzy").unwrap_err();
        assert!(err.to_string().contains("fuzzy"));
    }
}
