use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::extractor::TextExtractor;
use super::{ExtractionError, UploadedDocument};

const SCRATCH_PREFIX: &str = "resume-upload-";

/// OCR over scanned resumes through the Tesseract CLI.
///
/// The upload is staged in a scratch file that is removed when the guard is
/// dropped, whichever way extraction ends. The child process is killed if the
/// request future is dropped mid-recognition.
pub struct OcrTextExtractor {
    binary: String,
    language: String,
    scratch_dir: Option<PathBuf>,
}

impl OcrTextExtractor {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            scratch_dir: None,
        }
    }

    /// Stage uploads in `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.scratch_dir = dir;
        self
    }
}

#[async_trait]
impl TextExtractor for OcrTextExtractor {
    async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let suffix = scratch_suffix(&document.filename);
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX).suffix(&suffix);
        let scratch = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        tokio::fs::write(scratch.path(), &document.bytes).await?;

        debug!(
            "Running {} on {:?} (lang={})",
            self.binary,
            scratch.path(),
            self.language
        );

        let output = Command::new(&self.binary)
            .arg(scratch.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExtractionError::OcrUnavailable(format!("{}: {e}", self.binary)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(ExtractionError::Ocr(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }
        if !stderr.trim().is_empty() {
            warn!("OCR reported: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Keeps the upload's extension so the OCR engine can sniff the image format.
fn scratch_suffix(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
