//! Format-independent page layout.
//!
//! Lines flow top to bottom, each taking its style's fixed advance. A line
//! that would cross the bottom margin starts a new page instead; lines are
//! never split across pages. Over-long lines are wrapped into several atomic
//! lines before pagination.

use crate::styles::DocumentStyles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Subtitle,
    Heading,
    Item,
    Note,
}

/// A line of text before layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
    /// Space above this line, dropped when the line opens a page.
    pub space_before: f32,
}

impl Line {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
            space_before: 0.0,
        }
    }

    pub fn with_space_before(mut self, space: f32) -> Self {
        self.space_before = space;
        self
    }
}

/// A line fixed to a page. Vertical positions are measured down from the top
/// edge of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: LineStyle,
    pub x: f32,
    pub top: f32,
    pub baseline: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Wrap and paginate `lines`. Always returns at least one page.
pub fn paginate(lines: Vec<Line>, styles: &DocumentStyles) -> Vec<Page> {
    let bottom = styles.content_bottom();
    let mut pages = Vec::new();
    let mut current = Page::default();
    let mut cursor = styles.margin_top;

    for line in wrap_lines(lines, styles) {
        let metrics = styles.metrics(line.style);

        // An empty page always takes the next line, even one taller than the
        // content area, and drops its space before.
        if !current.is_empty() {
            if cursor + line.space_before + metrics.advance > bottom {
                pages.push(std::mem::take(&mut current));
                cursor = styles.margin_top;
            } else {
                cursor += line.space_before;
            }
        }

        current.lines.push(PlacedLine {
            x: styles.x(line.style),
            top: cursor,
            baseline: cursor + metrics.size,
            bottom: cursor + metrics.advance,
            text: line.text,
            style: line.style,
        });
        cursor += metrics.advance;
    }

    pages.push(current);
    pages
}

/// Split every line wider than its style's character capacity.
pub fn wrap_lines(lines: Vec<Line>, styles: &DocumentStyles) -> Vec<Line> {
    let mut wrapped = Vec::with_capacity(lines.len());
    for line in lines {
        let max_chars = styles.max_chars(line.style);
        let mut pieces = wrap_text(&line.text, max_chars).into_iter();
        if let Some(first) = pieces.next() {
            wrapped.push(Line {
                text: first,
                style: line.style,
                space_before: line.space_before,
            });
        }
        wrapped.extend(pieces.map(|text| Line::new(text, line.style)));
    }
    wrapped
}

/// Word-wrap `text` to at most `max_chars` characters per line.
///
/// Text that already fits is returned untouched, whitespace included. Words
/// longer than a whole line are broken at the character limit.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > max_chars {
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(max_chars).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
