//! Request pipeline: classify → extract → score.
//!
//! Stages run strictly in order within a request; nothing downstream can
//! start before the transcript exists.

use tracing::{info, warn};

use crate::analysis::fit_scoring::{Analysis, FitScorer};
use crate::document::{DocumentExtractor, DocumentKind, Transcript, UploadedDocument};
use crate::errors::AppError;
use crate::models::upload::JobDescription;

/// Classifies the upload and extracts its text. Unsupported documents are
/// rejected before any extractor runs. The upload is consumed here and
/// dropped once extraction finishes.
pub async fn prepare_transcript(
    extractor: &DocumentExtractor,
    document: UploadedDocument,
) -> Result<Transcript, AppError> {
    let kind = document.kind();
    info!(
        "Classified '{}' ({}) as {:?}",
        document.filename, document.content_type, kind
    );

    if kind == DocumentKind::Unsupported {
        return Err(AppError::UnsupportedFormat(format!(
            "'{}' with content type '{}'",
            document.filename, document.content_type
        )));
    }

    Ok(extractor.extract(&document, kind).await?)
}

/// Scores with `primary`; when it fails on the reasoning path and a fallback
/// is given, the fallback's result is returned instead. Other errors always propagate.
pub async fn score_transcript(
    primary: &dyn FitScorer,
    fallback: Option<&dyn FitScorer>,
    transcript: &Transcript,
    job_description: &JobDescription,
) -> Result<Analysis, AppError> {
    match primary.score(transcript, job_description).await {
        Err(err) if err.is_reasoning_failure() => match fallback {
            Some(fallback) => {
                warn!(
                    "{:?} scoring failed ({err}); falling back to {:?}",
                    primary.strategy(),
                    fallback.strategy()
                );
                fallback.score(transcript, job_description).await
            }
            None => Err(err),
        },
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::analysis::fit_scoring::{JdMatchMode, KeywordFitScorer, ScoringStrategy};
    use crate::analysis::skill_matcher::SkillMatcher;
    use crate::document::{ExtractionError, TextExtractor};

    struct CountingExtractor(AtomicUsize);

    #[async_trait]
    impl TextExtractor for CountingExtractor {
        async fn extract(&self, _document: &UploadedDocument) -> Result<String, ExtractionError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok("Python and Docker".to_string())
        }
    }

    struct FailingScorer(AppError);

    #[async_trait]
    impl FitScorer for FailingScorer {
        fn strategy(&self) -> ScoringStrategy {
            ScoringStrategy::AiAssisted
        }

        async fn score(
            &self,
            _transcript: &Transcript,
            _job_description: &JobDescription,
        ) -> Result<Analysis, AppError> {
            Err(match &self.0 {
                AppError::UpstreamServiceFailure(m) => AppError::UpstreamServiceFailure(m.clone()),
                AppError::MalformedUpstreamResponse(m) => {
                    AppError::MalformedUpstreamResponse(m.clone())
                }
                other => AppError::Validation(other.to_string()),
            })
        }
    }

    fn keyword_scorer() -> KeywordFitScorer {
        KeywordFitScorer::new(
            Arc::new(SkillMatcher::with_default_lexicon().unwrap()),
            JdMatchMode::Substring,
        )
    }

    #[tokio::test]
    async fn test_docx_short_circuits_before_extraction() {
        let counter = Arc::new(CountingExtractor(AtomicUsize::new(0)));
        let extractor = DocumentExtractor::new(counter.clone(), counter.clone());
        let doc = UploadedDocument::new(b"PK\x03\x04".to_vec(), "resume.docx", "application/pdf");

        let err = prepare_transcript(&extractor, doc).await.unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_supported_upload_is_extracted_once() {
        let counter = Arc::new(CountingExtractor(AtomicUsize::new(0)));
        let extractor = DocumentExtractor::new(counter.clone(), counter.clone());
        let doc = UploadedDocument::new(b"%PDF-1.4".to_vec(), "resume.pdf", "application/pdf");

        let transcript = prepare_transcript(&extractor, doc).await.unwrap();
        assert_eq!(transcript.text, "Python and Docker");
        assert_eq!(transcript.source_kind, DocumentKind::Pdf);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reasoning_failure_falls_back_to_keywords() {
        let primary = FailingScorer(AppError::UpstreamServiceFailure("timeout".into()));
        let fallback = keyword_scorer();
        let transcript = Transcript::new("Python and Docker", DocumentKind::Pdf);
        let jd = JobDescription::parse(Some("python".into())).unwrap();

        let analysis = score_transcript(&primary, Some(&fallback), &transcript, &jd)
            .await
            .unwrap();
        assert_eq!(analysis.strategy(), ScoringStrategy::Deterministic);
    }

    #[tokio::test]
    async fn test_reasoning_failure_without_fallback_propagates() {
        let primary = FailingScorer(AppError::MalformedUpstreamResponse("junk".into()));
        let transcript = Transcript::new("Python", DocumentKind::Pdf);
        let jd = JobDescription::default();

        let err = score_transcript(&primary, None, &transcript, &jd)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedUpstreamResponse(_)));
    }

    #[tokio::test]
    async fn test_non_reasoning_failure_is_never_masked() {
        let primary = FailingScorer(AppError::Validation("bad".into()));
        let fallback = keyword_scorer();
        let transcript = Transcript::new("Python", DocumentKind::Pdf);
        let jd = JobDescription::default();

        let err = score_transcript(&primary, Some(&fallback), &transcript, &jd)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
