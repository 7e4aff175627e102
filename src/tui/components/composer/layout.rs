//! Hard-wrapping layout for the composer.
//!
//! Text and ghost text share one wrapping rule so the cursor computed from
//! the text alone lands exactly where the rendered text ends. Rows break on
//! `\n` and whenever the next character would overflow the width; there is
//! no word wrapping.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Offset from area edge to content (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// Calculate the inner content width after subtracting border/padding overhead.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Accumulates styled characters into width-limited rows.
struct RowBuilder {
    width: usize,
    rows: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    segment: String,
    segment_style: Style,
    col: usize,
}

impl RowBuilder {
    fn new(width: u16) -> Self {
        Self {
            width: usize::from(width.max(1)),
            rows: Vec::new(),
            spans: Vec::new(),
            segment: String::new(),
            segment_style: Style::default(),
            col: 0,
        }
    }

    fn flush_segment(&mut self) {
        if !self.segment.is_empty() {
            let text = std::mem::take(&mut self.segment);
            self.spans.push(Span::styled(text, self.segment_style));
        }
    }

    fn break_row(&mut self) {
        self.flush_segment();
        self.rows.push(Line::from(std::mem::take(&mut self.spans)));
        self.col = 0;
    }

    fn push_str(&mut self, text: &str, style: Style) {
        if style != self.segment_style {
            self.flush_segment();
            self.segment_style = style;
        }
        for c in text.chars() {
            if c == '\n' {
                self.break_row();
                continue;
            }
            let w = c.width().unwrap_or(0);
            if self.col + w > self.width {
                self.break_row();
            }
            self.segment.push(c);
            self.col += w;
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_row();
        self.rows
    }
}

/// Lay out `text` followed by `ghost` into rows of at most `width` columns.
pub(super) fn layout_rows(
    text: &str,
    text_style: Style,
    ghost: Option<&str>,
    ghost_style: Style,
    width: u16,
) -> Vec<Line<'static>> {
    let mut builder = RowBuilder::new(width);
    builder.push_str(text, text_style);
    if let Some(ghost) = ghost {
        builder.push_str(ghost, ghost_style);
    }
    builder.finish()
}

/// Row and column (in cells) where the cursor sits after `prefix`.
pub(super) fn cursor_cell(prefix: &str, width: u16) -> (u16, u16) {
    let width = usize::from(width.max(1));
    let (mut row, mut col) = (0usize, 0usize);
    for c in prefix.chars() {
        if c == '\n' {
            row += 1;
            col = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if col + w > width {
            row += 1;
            col = 0;
        }
        col += w;
    }
    // A full row puts the cursor at the start of the next one.
    if col >= width {
        row += 1;
        col = 0;
    }
    (row as u16, col as u16)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
