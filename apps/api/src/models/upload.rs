use axum::extract::Multipart;

use crate::document::UploadedDocument;
use crate::errors::AppError;

/// Upper bound on job-description text accepted at the boundary.
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 20_000;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

/// A trimmed, length-bounded job description. Empty when none was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn parse(raw: Option<String>) -> Result<Self, AppError> {
        let text = raw.unwrap_or_default().trim().to_string();
        let chars = text.chars().count();
        if chars > MAX_JOB_DESCRIPTION_CHARS {
            return Err(AppError::Validation(format!(
                "jobDescription is too long ({chars} characters, max {MAX_JOB_DESCRIPTION_CHARS})"
            )));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validated multipart upload: one resume file plus an optional job description.
#[derive(Debug)]
pub struct UploadForm {
    pub document: UploadedDocument,
    pub job_description: JobDescription,
}

impl UploadForm {
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_upload_bytes: usize,
    ) -> Result<Self, AppError> {
        let mut document = None;
        let mut job_description = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some(RESUME_FIELD) => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Could not read uploaded file: {e}"))
                    })?;
                    if bytes.len() > max_upload_bytes {
                        return Err(AppError::Validation(format!(
                            "Uploaded file is too large ({} bytes, max {max_upload_bytes})",
                            bytes.len()
                        )));
                    }
                    document = Some(UploadedDocument::new(bytes, filename, content_type));
                }
                Some(JOB_DESCRIPTION_FIELD) => {
                    job_description = Some(field.text().await.map_err(|e| {
                        AppError::Validation(format!("Could not read jobDescription: {e}"))
                    })?);
                }
                _ => {}
            }
        }

        let document =
            document.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
        if document.bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        Ok(Self {
            document,
            job_description: JobDescription::parse(job_description)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_description_is_trimmed_and_optional() {
        assert!(JobDescription::parse(None).unwrap().is_empty());
        assert_eq!(
            JobDescription::parse(Some("  React dev \n".to_string()))
                .unwrap()
                .as_str(),
            "React dev"
        );
    }

    #[test]
    fn test_job_description_length_is_bounded() {
        let ok = "x".repeat(MAX_JOB_DESCRIPTION_CHARS);
        assert!(JobDescription::parse(Some(ok)).is_ok());

        let too_long = "x".repeat(MAX_JOB_DESCRIPTION_CHARS + 1);
        assert!(matches!(
            JobDescription::parse(Some(too_long)),
            Err(AppError::Validation(_))
        ));
    }
}
