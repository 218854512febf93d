use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, LineSpacing, LineSpacingType, PageMargin, Paragraph, Run, RunFonts,
    Style, StyleType,
};

use crate::error::ExportError;
use crate::layout::{LineStyle, Page, PlacedLine};
use crate::styles::DocumentStyles;

const TITLE_STYLE: &str = "ReportTitle";

/// Write laid-out pages as a DOCX document.
///
/// Margins, line heights and gaps are taken from the layout so Word fills each
/// page exactly as `paginate` did. The first paragraph of every page after
/// the first carries `pageBreakBefore`.
pub fn generate_docx(pages: &[Page], styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .page_size(
            pt_to_twips(styles.page_width) as u32,
            pt_to_twips(styles.page_height) as u32,
        )
        .page_margin(page_margin(styles))
        .add_style(title_style(styles));

    for (index, page) in pages.iter().enumerate() {
        let mut previous_bottom: Option<f32> = None;
        for (position, line) in page.lines.iter().enumerate() {
            // The gap is whatever the layout left between this line and the last.
            let space_before = previous_bottom.map_or(0.0, |bottom| line.top - bottom);
            let para = line_paragraph(line, space_before, styles);
            let para = if index > 0 && position == 0 {
                para.page_break_before(true)
            } else {
                para
            };
            docx = docx.add_paragraph(para);
            previous_bottom = Some(line.bottom);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn page_margin(styles: &DocumentStyles) -> PageMargin {
    PageMargin::new()
        .top(pt_to_twips(styles.margin_top))
        .bottom(pt_to_twips(styles.margin_bottom))
        .left(pt_to_twips(styles.margin_left))
        .right(pt_to_twips(styles.margin_right))
}

/// Exact line height and gap for one placed line, in the units `w:spacing` uses.
pub fn line_spacing(advance: f32, space_before: f32) -> LineSpacing {
    LineSpacing::new()
        .line_rule(LineSpacingType::Exact)
        .line(pt_to_twips(advance))
        .before(pt_to_twips(space_before.max(0.0)) as u32)
        .after(0)
}

fn title_style(styles: &DocumentStyles) -> Style {
    Style::new(TITLE_STYLE, StyleType::Paragraph)
        .name("Report Title")
        .size(half_points(styles.title.size))
        .bold()
}

fn line_paragraph(line: &PlacedLine, space_before: f32, styles: &DocumentStyles) -> Paragraph {
    let font = match line.style {
        LineStyle::Title => &styles.heading_font,
        _ => &styles.body_font,
    };
    let metrics = styles.metrics(line.style);
    let run = Run::new()
        .add_text(&line.text)
        .size(half_points(metrics.size))
        .fonts(RunFonts::new().ascii(font));

    let para = Paragraph::new()
        .align(AlignmentType::Left)
        .line_spacing(line_spacing(metrics.advance, space_before))
        .add_run(run);
    let indent = line.x - styles.margin_left;
    let para = if indent > 0.0 {
        para.indent(Some(pt_to_twips(indent)), None, None, None)
    } else {
        para
    };
    match line.style {
        LineStyle::Title => para.style(TITLE_STYLE),
        _ => para,
    }
}

// OOXML sizes runs in half-points and lengths in twentieths of a point.
fn half_points(pt: f32) -> usize {
    (pt * 2.0).round() as usize
}

pub fn pt_to_twips(pt: f32) -> i32 {
    (pt * 20.0).round() as i32
}
