use std::path::Path;

use super::DocumentKind;

const PDF_MEDIA_TYPE: &str = "application/pdf";
const IMAGE_MEDIA_PREFIX: &str = "image/";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
/// Word-processor and text formats. These extensions are conclusive even when
/// the declared content type claims PDF or image.
const REJECTED_EXTENSIONS: &[&str] = &["doc", "docx", "odt", "rtf", "txt", "pages"];

/// Classifies an upload from its filename extension and declared content type.
///
/// Either signal is enough: clients routinely send a generic or wrong content
/// type, so a matching extension wins on its own and vice versa. PDF is
/// checked before image. A known word-processor extension is never overridden.
pub fn classify(filename: &str, content_type: &str) -> DocumentKind {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if extension
        .as_deref()
        .is_some_and(|e| REJECTED_EXTENSIONS.contains(&e))
    {
        return DocumentKind::Unsupported;
    }

    let is_pdf = media_type == PDF_MEDIA_TYPE || extension.as_deref() == Some("pdf");
    if is_pdf {
        return DocumentKind::Pdf;
    }

    let is_image = media_type.starts_with(IMAGE_MEDIA_PREFIX)
        || extension
            .as_deref()
            .map(|e| IMAGE_EXTENSIONS.contains(&e))
            .unwrap_or(false);
    if is_image {
        return DocumentKind::Image;
    }

    DocumentKind::Unsupported
}
