//! PDF export of a rendered invoice.
//!
//! The print layout is drawn onto an A4-wide page in a monospace builtin
//! font. The font shrinks until the widest line fits the page width, and the
//! page grows taller when the content does not fit on one A4 height.

use crate::{
    core::invoice::InvoiceDocument,
    errors::{Error, Result},
};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::{debug, instrument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const MAX_FONT_PT: f32 = 11.0;
/// Advance width of a Courier glyph relative to its point size
const GLYPH_WIDTH_EM: f32 = 0.6;
const MM_PER_PT: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;

/// Page geometry chosen for a block of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub font_size_pt: f32,
    pub line_height_mm: f32,
    pub page_height_mm: f32,
}

/// Fits `lines` to the page width and sizes the page height to the content.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn layout(lines: &[&str]) -> PageLayout {
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(1);
    let usable_width = 2.0f32.mul_add(-MARGIN_MM, PAGE_WIDTH_MM);
    let fit = usable_width / (widest as f32 * GLYPH_WIDTH_EM * MM_PER_PT);
    let font_size_pt = fit.min(MAX_FONT_PT);
    let line_height_mm = font_size_pt * MM_PER_PT * LINE_SPACING;
    let content_height = (lines.len() as f32).mul_add(line_height_mm, 2.0 * MARGIN_MM);

    PageLayout {
        font_size_pt,
        line_height_mm,
        page_height_mm: content_height.max(PAGE_HEIGHT_MM),
    }
}

/// Exports an invoice as a single-page PDF.
///
/// # Errors
/// Returns [`Error::Pdf`] if the document cannot be built.
#[instrument(skip(document), fields(invoice = %document.invoice_number))]
pub fn export_pdf(document: &InvoiceDocument) -> Result<Vec<u8>> {
    let text = document.print_text()?;
    let lines: Vec<&str> = text.lines().collect();
    let page = layout(&lines);

    let (doc, page_index, layer_index) = PdfDocument::new(
        document.invoice_number.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(page.page_height_mm),
        "Invoice",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| Error::Pdf {
            message: e.to_string(),
        })?;
    let layer = doc.get_page(page_index).get_layer(layer_index);

    let mut y = page.page_height_mm - MARGIN_MM - page.line_height_mm;
    for line in &lines {
        layer.use_text(*line, page.font_size_pt, Mm(MARGIN_MM), Mm(y), &font);
        y -= page.line_height_mm;
    }

    let bytes = doc.save_to_bytes().map_err(|e| Error::Pdf {
        message: e.to_string(),
    })?;
    debug!("Rendered {} byte PDF", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::business::BusinessConfig, core::fallback, core::invoice::render};

    #[test]
    fn test_short_lines_use_max_font_on_a4() {
        let page = layout(&["short", "lines"]);
        assert!((page.font_size_pt - MAX_FONT_PT).abs() < f32::EPSILON);
        assert!((page.page_height_mm - PAGE_HEIGHT_MM).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wide_line_shrinks_font_to_fit() {
        let wide = "x".repeat(200);
        let page = layout(&[wide.as_str()]);
        assert!(page.font_size_pt < MAX_FONT_PT);
        let line_width = 200.0 * GLYPH_WIDTH_EM * page.font_size_pt * MM_PER_PT;
        assert!(line_width <= PAGE_WIDTH_MM - 2.0 * MARGIN_MM + 0.01);
    }

    #[test]
    fn test_tall_content_grows_page() {
        let lines = vec!["row"; 300];
        let page = layout(&lines);
        assert!(page.page_height_mm > PAGE_HEIGHT_MM);
    }

    #[test]
    fn test_export_produces_pdf_bytes() {
        let booking = fallback::bookings().remove(0);
        let client = fallback::clients()
            .into_iter()
            .find(|c| c.id == booking.client_id)
            .unwrap();
        let doc = render(&booking, &client, &BusinessConfig::default());
        let bytes = export_pdf(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
