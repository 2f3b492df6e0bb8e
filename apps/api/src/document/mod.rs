// Document intake: classification of uploads and text extraction.
// Extraction is the only I/O-bound stage before scoring; everything after it
// works on the `Transcript`.

pub mod classifier;
pub mod extractor;
pub mod ocr;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub use classifier::classify;
pub use extractor::{DocumentExtractor, PdfTextExtractor, TextExtractor};
pub use ocr::OcrTextExtractor;

/// Kind of an uploaded document, derived from its declared metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Image,
    Unsupported,
}

/// A resume upload as received at the boundary. Dropped once extraction finishes.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: String,
}

impl UploadedDocument {
    pub fn new(
        bytes: impl Into<Bytes>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        classify(&self.filename, &self.content_type)
    }
}

/// Plain text pulled out of a document. Case is preserved; consumers fold as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub source_kind: DocumentKind,
}

impl Transcript {
    pub fn new(text: impl Into<String>, source_kind: DocumentKind) -> Self {
        Self {
            text: text.into(),
            source_kind,
        }
    }

    /// First `max_chars` characters, never splitting a code point.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF could not be parsed: {0}")]
    Pdf(String),

    #[error("OCR engine could not be started: {0}")]
    OcrUnavailable(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("no readable text found in document")]
    NoText,

    #[error("document kind {0:?} cannot be extracted")]
    UnsupportedKind(DocumentKind),

    #[error("scratch storage error: {0}")]
    Io(#[from] std::io::Error),
}
