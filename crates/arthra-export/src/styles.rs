use serde::{Deserialize, Serialize};

use crate::layout::LineStyle;

/// Vertical metrics for one kind of line, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineMetrics {
    /// Font size.
    pub size: f32,
    /// Distance from the top of this line to the top of the next one.
    pub advance: f32,
}

/// Page geometry and typography for report exports. All lengths are points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text in DOCX output (e.g. "Helvetica", "Calibri").
    pub body_font: String,

    /// Font for the title in DOCX output.
    pub heading_font: String,

    pub page_width: f32,
    pub page_height: f32,

    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,

    /// Extra left offset for list items and note text.
    pub indent: f32,

    /// Blank space before a section heading, unless it starts a page.
    pub section_gap: f32,

    /// Average glyph width as a fraction of the font size, used to decide
    /// where over-long lines are wrapped.
    pub char_width_em: f32,

    pub title: LineMetrics,
    pub subtitle: LineMetrics,
    pub heading: LineMetrics,
    pub item: LineMetrics,
    pub note: LineMetrics,
}

impl DocumentStyles {
    pub fn metrics(&self, style: LineStyle) -> LineMetrics {
        match style {
            LineStyle::Title => self.title,
            LineStyle::Subtitle => self.subtitle,
            LineStyle::Heading => self.heading,
            LineStyle::Item => self.item,
            LineStyle::Note => self.note,
        }
    }

    /// Left edge of a line of the given style.
    pub fn x(&self, style: LineStyle) -> f32 {
        match style {
            LineStyle::Title | LineStyle::Subtitle | LineStyle::Heading => self.margin_left,
            LineStyle::Item | LineStyle::Note => self.margin_left + self.indent,
        }
    }

    /// Lowest point a line may reach on a page.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    /// How many characters of `style` fit between its left edge and the right margin.
    pub fn max_chars(&self, style: LineStyle) -> usize {
        let width = self.page_width - self.margin_right - self.x(style);
        let glyph = self.metrics(style).size * self.char_width_em;
        if glyph <= 0.0 || width <= glyph {
            return 1;
        }
        (width / glyph).floor() as usize
    }
}

impl Default for DocumentStyles {
    /// US Letter with 50pt margins.
    fn default() -> Self {
        Self {
            body_font: "Helvetica".to_string(),
            heading_font: "Helvetica".to_string(),
            page_width: 612.0,
            page_height: 792.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
            margin_left: 50.0,
            margin_right: 50.0,
            indent: 20.0,
            section_gap: 10.0,
            char_width_em: 0.5,
            title: LineMetrics {
                size: 16.0,
                advance: 30.0,
            },
            subtitle: LineMetrics {
                size: 12.0,
                advance: 20.0,
            },
            heading: LineMetrics {
                size: 12.0,
                advance: 16.0,
            },
            item: LineMetrics {
                size: 12.0,
                advance: 14.0,
            },
            note: LineMetrics {
                size: 11.0,
                advance: 13.2,
            },
        }
    }
}
