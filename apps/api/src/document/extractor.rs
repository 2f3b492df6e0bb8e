//! Text extraction: one `TextExtractor` per document kind, dispatched by `DocumentExtractor`.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

use super::{DocumentKind, ExtractionError, Transcript, UploadedDocument};

/// Converts the raw bytes of one document kind into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError>;
}

/// Text-layer extraction for PDFs via `pdf-extract`.
///
/// The parser is synchronous and CPU-bound, so it runs on the blocking pool.
/// A panic inside the parser surfaces as `ExtractionError::Pdf`.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let bytes: Bytes = document.bytes.clone();

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::Pdf(format!("PDF parser aborted: {e}")))?
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        Ok(text)
    }
}

/// Routes a document to the extractor for its kind and wraps the result in a `Transcript`.
#[derive(Clone)]
pub struct DocumentExtractor {
    pdf: Arc<dyn TextExtractor>,
    image: Arc<dyn TextExtractor>,
}

impl DocumentExtractor {
    pub fn new(pdf: Arc<dyn TextExtractor>, image: Arc<dyn TextExtractor>) -> Self {
        Self { pdf, image }
    }

    pub async fn extract(
        &self,
        document: &UploadedDocument,
        kind: DocumentKind,
    ) -> Result<Transcript, ExtractionError> {
        let extractor = match kind {
            DocumentKind::Pdf => &self.pdf,
            DocumentKind::Image => &self.image,
            DocumentKind::Unsupported => return Err(ExtractionError::UnsupportedKind(kind)),
        };

        debug!(
            "Extracting {:?} '{}' ({} bytes)",
            kind,
            document.filename,
            document.bytes.len()
        );
        let raw = extractor.extract(document).await?;
        let text = normalize_text(&raw);

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        info!(
            "Extracted {} chars from {:?} '{}'",
            text.chars().count(),
            kind,
            document.filename
        );
        Ok(Transcript::new(text, kind))
    }
}

/// Page breaks become newlines and trailing whitespace is dropped; line order is untouched.
fn normalize_text(raw: &str) -> String {
    raw.replace('\x0c', "\n")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct FixedText(&'static str, AtomicUsize);

    #[async_trait]
    impl TextExtractor for FixedText {
        async fn extract(&self, _document: &UploadedDocument) -> Result<String, ExtractionError> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(self.0.to_string())
        }
    }

    fn extractor_with(pdf: Arc<FixedText>, image: Arc<FixedText>) -> DocumentExtractor {
        DocumentExtractor::new(pdf, image)
    }

    #[tokio::test]
    async fn test_dispatches_by_kind() {
        let pdf = Arc::new(FixedText("from pdf", AtomicUsize::new(0)));
        let image = Arc::new(FixedText("from ocr", AtomicUsize::new(0)));
        let extractor = extractor_with(pdf.clone(), image.clone());
        let doc = UploadedDocument::new(vec![0u8], "a.png", "image/png");

        let transcript = extractor.extract(&doc, DocumentKind::Image).await.unwrap();
        assert_eq!(transcript.text, "from ocr");
        assert_eq!(transcript.source_kind, DocumentKind::Image);
        assert_eq!(pdf.1.load(Ordering::SeqCst), 0);
        assert_eq!(image.1.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_kind_never_reaches_an_extractor() {
        let pdf = Arc::new(FixedText("x", AtomicUsize::new(0)));
        let image = Arc::new(FixedText("x", AtomicUsize::new(0)));
        let extractor = extractor_with(pdf.clone(), image.clone());
        let doc = UploadedDocument::new(vec![0u8], "a.docx", "application/msword");

        let err = extractor
            .extract(&doc, DocumentKind::Unsupported)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedKind(_)));
        assert_eq!(pdf.1.load(Ordering::SeqCst) + image.1.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_text_is_an_extraction_failure() {
        let blank = Arc::new(FixedText(" \n\x0c \n", AtomicUsize::new(0)));
        let extractor = extractor_with(blank.clone(), blank);
        let doc = UploadedDocument::new(vec![0u8], "a.pdf", "application/pdf");

        let err = extractor.extract(&doc, DocumentKind::Pdf).await.unwrap_err();
        assert!(matches!(err, ExtractionError::NoText));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_an_extraction_failure() {
        let doc = UploadedDocument::new(
            b"definitely not a pdf".to_vec(),
            "resume.pdf",
            "application/pdf",
        );
        let err = PdfTextExtractor.extract(&doc).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_normalize_keeps_line_order_and_splits_pages() {
        let raw = "Jane Doe   \nRust engineer\x0cPage two  \n\n";
        assert_eq!(normalize_text(raw), "Jane Doe\nRust engineer\nPage two");
    }
}
