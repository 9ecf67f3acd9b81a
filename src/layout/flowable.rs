//! Story elements and line wrapping.
//!
//! A story is an ordered `Vec<Flowable>`. The frame (see [`super::frame`])
//! places flowables top to bottom and starts a new page when one does not
//! fit; nothing here knows about pages.

use super::font::text_width;
use super::style::{ParagraphStyle, TableStyle};

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    /// Forces the following text onto a new line.
    LineBreak,
}

/// One wrapped line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Width in points at the style's font size.
    pub width: f32,
}

/// A block of text set in a single style.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub content: Vec<Inline>,
}

impl Paragraph {
    /// A paragraph of plain text with no forced breaks.
    pub fn new(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            style,
            content: vec![Inline::Text(text.into())],
        }
    }

    /// A paragraph whose `\n` characters become explicit line breaks.
    pub fn with_line_breaks(text: &str, style: ParagraphStyle) -> Self {
        let mut content = Vec::new();
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                content.push(Inline::LineBreak);
            }
            if !segment.is_empty() {
                content.push(Inline::Text(segment.to_string()));
            }
        }
        Self { style, content }
    }

    /// Number of explicit line breaks.
    pub fn line_breaks(&self) -> usize {
        self.content
            .iter()
            .filter(|i| matches!(i, Inline::LineBreak))
            .count()
    }

    /// The paragraph's text with line breaks rendered as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.content {
            match inline {
                Inline::Text(t) => out.push_str(t),
                Inline::LineBreak => out.push('\n'),
            }
        }
        out
    }

    /// Break the paragraph into lines no wider than `max_width`.
    ///
    /// Runs of whitespace collapse to one space. A word wider than the line
    /// is split between characters. An empty paragraph has no lines.
    pub fn wrap(&self, max_width: f32) -> Vec<Line> {
        if self.content.iter().all(|i| match i {
            Inline::Text(t) => t.trim().is_empty(),
            Inline::LineBreak => false,
        }) {
            return Vec::new();
        }

        let text = self.plain_text();
        let mut lines = Vec::new();
        for segment in text.split('\n') {
            wrap_segment(segment, &self.style, max_width, &mut lines);
        }
        lines
    }

    /// Height of the wrapped paragraph, excluding surrounding space.
    pub fn height(&self, max_width: f32) -> f32 {
        self.wrap(max_width).len() as f32 * self.style.leading
    }
}

fn wrap_segment(segment: &str, style: &ParagraphStyle, max_width: f32, lines: &mut Vec<Line>) {
    let measure = |s: &str| text_width(s, style.font, style.font_size);
    let space = measure(" ");

    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let mut produced = false;

    for word in segment.split_whitespace() {
        let word_width = measure(word);

        if !current.is_empty() && current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(Line {
                text: std::mem::take(&mut current),
                width: current_width,
            });
            produced = true;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
        } else {
            // Hard-break an over-long word; the tail stays open for the next word.
            let mut pieces = split_word(word, max_width, &measure);
            let last = pieces.pop().unwrap_or_default();
            for piece in pieces {
                let width = measure(&piece);
                lines.push(Line { text: piece, width });
                produced = true;
            }
            current_width = measure(&last);
            current = last;
        }
    }

    if !current.is_empty() || !produced {
        lines.push(Line {
            text: current,
            width: current_width,
        });
    }
}

fn split_word(word: &str, max_width: f32, measure: &dyn Fn(&str) -> f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if measure(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    pieces.push(piece);
    pieces
}

/// A grid of text cells with fixed column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
    pub col_widths: Vec<f32>,
    pub style: TableStyle,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>, col_widths: Vec<f32>, style: TableStyle) -> Self {
        Self {
            rows,
            col_widths,
            style,
        }
    }

    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    /// Wrapped lines for every cell of `row`.
    pub fn wrap_row(&self, row: usize) -> Vec<Vec<Line>> {
        let cell_style = ParagraphStyle::new(
            "TableCell",
            self.style.font,
            self.style.font_size,
            self.style.leading,
        );
        let pad = self.style.padding.left + self.style.padding.right;
        self.rows[row]
            .iter()
            .zip(&self.col_widths)
            .map(|(cell, &w)| Paragraph::new(cell.clone(), cell_style.clone()).wrap(w - pad))
            .collect()
    }

    /// Height of `row` including vertical padding.
    pub fn row_height(&self, row: usize) -> f32 {
        self.cells_height(&self.wrap_row(row))
    }

    /// Height of wrapped cells drawn as one row; an empty row keeps one line.
    pub fn cells_height(&self, cells: &[Vec<Line>]) -> f32 {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        self.lines_height(lines)
    }

    /// Height of `lines` text lines plus vertical padding.
    pub fn lines_height(&self, lines: usize) -> f32 {
        lines as f32 * self.style.leading + self.style.padding.top + self.style.padding.bottom
    }
}

/// Anything that can be placed in a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    /// Vertical gap in points.
    Spacer(f32),
    Paragraph(Paragraph),
    /// Ends the current page.
    PageBreak,
    Table(Table),
}

impl Flowable {
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Flowable::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Flowable::Table(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font::Font;

    fn body() -> ParagraphStyle {
        ParagraphStyle::new("Body", Font::Helvetica, 12.0, 16.0)
    }

    #[test]
    fn newlines_become_line_breaks() {
        let p = Paragraph::with_line_breaks("Day 1\nMorning: museum\nEvening: dinner", body());
        assert_eq!(p.line_breaks(), 2);
        assert_eq!(p.plain_text(), "Day 1\nMorning: museum\nEvening: dinner");
        assert_eq!(p.wrap(500.0).len(), 3);
    }

    #[test]
    fn empty_paragraph_has_no_lines() {
        assert!(Paragraph::new("", body()).wrap(500.0).is_empty());
        assert!(Paragraph::with_line_breaks("   ", body()).wrap(500.0).is_empty());
    }

    #[test]
    fn consecutive_breaks_keep_blank_line() {
        let p = Paragraph::with_line_breaks("a\n\nb", body());
        let lines = p.wrap(500.0);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "", "b"]);
    }

    #[test]
    fn long_text_wraps_within_width() {
        let text = "word ".repeat(200);
        let p = Paragraph::new(text, body());
        let lines = p.wrap(200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 200.0 + 1e-3, "line too wide: {}", line.width);
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.text.split(' ')).collect();
        assert_eq!(rejoined.len(), 200);
    }

    #[test]
    fn whitespace_collapses() {
        let p = Paragraph::new("Visit   the\tLouvre", body());
        let lines = p.wrap(500.0);
        assert_eq!(lines[0].text, "Visit the Louvre");
    }

    #[test]
    fn overlong_word_is_hard_broken() {
        let word = "x".repeat(300);
        let p = Paragraph::new(word.clone(), body());
        let lines = p.wrap(100.0);
        assert!(lines.len() > 1);
        let joined: String = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(joined, word);
        for line in &lines {
            assert!(line.width <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn table_row_height_includes_padding() {
        let t = Table::new(
            vec![vec!["Source".into(), "New York".into()]],
            vec![140.0, 320.0],
            TableStyle::default(),
        );
        assert_eq!(t.width(), 460.0);
        assert_eq!(t.row_height(0), 12.0 + 3.0 + 3.0);
    }
}
