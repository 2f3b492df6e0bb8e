//! PDF emission for a laid-out report.
//!
//! `PdfDocumentReference` is not `Send`, so building and writing both happen
//! on the same blocking worker thread.

use std::io::{BufWriter, Write};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, Rgb,
};

use crate::report::layout::{ReportPlan, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::report::RenderError;

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

/// Builds the in-memory PDF for `plan`. No bytes are written yet.
pub fn build_document(plan: &ReportPlan) -> Result<PdfDocumentReference, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        plan.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (index, page) in plan.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Layer {}", index + 1),
            );
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for line in &page.lines {
            let font: &IndirectFontRef = if line.style.is_bold() { &bold } else { &regular };
            let (r, g, b) = line.marker.map(|m| m.rgb()).unwrap_or(BLACK);
            layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
            layer.use_text(
                line.text.as_str(),
                line.style.font_size_pt(),
                Mm(line.x_mm),
                Mm(line.y_mm),
                font,
            );
        }
    }

    Ok(doc)
}

/// Serializes a built document into `sink`.
pub fn write_document<W: Write>(doc: PdfDocumentReference, sink: W) -> Result<(), RenderError> {
    let mut writer = BufWriter::new(sink);
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

/// Builds and serializes `plan` into memory.
#[cfg(test)]
pub fn render_to_vec(plan: &ReportPlan) -> Result<Vec<u8>, RenderError> {
    let doc = build_document(plan)?;
    let mut bytes = Vec::new();
    write_document(doc, &mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::report::layout::plan_report;
    use crate::report::ReportPayload;

    #[test]
    fn test_render_produces_pdf_bytes() {
        let payload = ReportPayload {
            fit_score: Some(67),
            matching_skills: Some(vec!["react".into(), "node".into()]),
            missing_skills: Some(vec!["aws".into()]),
            interview_prep: Some("BEHAVIORAL QUESTIONS\n- Tell me about a conflict".into()),
            ..Default::default()
        };
        let plan = plan_report(&payload, Utc::now());

        let bytes = render_to_vec(&plan).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_sink_failure_is_reported() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let plan = plan_report(&ReportPayload::default(), Utc::now());
        let doc = build_document(&plan).unwrap();
        assert!(write_document(doc, Closed).is_err());
    }
}
