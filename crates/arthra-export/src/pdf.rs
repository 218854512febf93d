use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::error::ExportError;
use crate::layout::{LineStyle, Page};
use crate::styles::DocumentStyles;

const LAYER: &str = "Report";

/// Write laid-out pages as a PDF, one PDF page per layout page.
///
/// Uses the built-in Helvetica faces, so no font files are embedded.
pub fn generate_pdf(
    title: &str,
    pages: &[Page],
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let width = pt_to_mm(styles.page_width);
    let height = pt_to_mm(styles.page_height);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, LAYER);
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, styles, &regular, &bold);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    styles: &DocumentStyles,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for line in &page.lines {
        let font = match line.style {
            LineStyle::Title => bold,
            _ => regular,
        };
        // PDF user space grows upward from the bottom edge.
        layer.use_text(
            line.text.as_str(),
            styles.metrics(line.style).size,
            pt_to_mm(line.x),
            pt_to_mm(styles.page_height - line.baseline),
            font,
        );
    }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}
