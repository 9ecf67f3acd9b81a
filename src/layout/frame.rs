//! Pagination: place a story into fixed frames and emit draw operations.
//!
//! Coordinates are PDF user space (origin bottom-left, points). The frame
//! is the page minus its margins; the cursor walks from the frame top down.
//!
//! Splitting rules:
//! - paragraphs split between lines,
//! - tables split between rows (each page's part gets its own outline); a
//!   row taller than a whole frame splits between its lines,
//! - a spacer that does not fit is dropped and a new page started,
//! - `space_before` is ignored at the top of a frame.

use super::flowable::{Flowable, Line, Paragraph, Table};
use super::font::Font;
use super::style::{Alignment, Color};

/// Page size and margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// ISO A4 with 40 pt margins.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.2756,
        height: 841.8898,
        margin: 40.0,
    };

    pub fn frame_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn frame_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }
}

/// A primitive drawing operation on one page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Single line of text; `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        line_width: f32,
        color: Color,
    },
}

/// Everything drawn on one page, in painting order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text of every text operation, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Lay out `story` onto as many pages as it needs. Always returns at least
/// one page.
pub fn paginate(story: &[Flowable], geometry: &PageGeometry) -> Vec<Page> {
    let mut frame = Frame::new(*geometry);
    for flowable in story {
        match flowable {
            Flowable::Spacer(h) => frame.place_spacer(*h),
            Flowable::Paragraph(p) => frame.place_paragraph(p),
            Flowable::PageBreak => frame.page_break(),
            Flowable::Table(t) => frame.place_table(t),
        }
    }
    frame.finish()
}

/// The part of a table row drawn on one page.
struct RowSlice {
    row: usize,
    cells: Vec<Vec<Line>>,
    height: f32,
}

struct Frame {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    cursor: f32,
}

impl Frame {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            cursor: geometry.height - geometry.margin,
        }
    }

    fn top(&self) -> f32 {
        self.geometry.height - self.geometry.margin
    }

    fn bottom(&self) -> f32 {
        self.geometry.margin
    }

    fn left(&self) -> f32 {
        self.geometry.margin
    }

    fn width(&self) -> f32 {
        self.geometry.frame_width()
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.bottom()
    }

    fn at_top(&self) -> bool {
        (self.top() - self.cursor).abs() < 0.01
    }

    fn is_blank(&self) -> bool {
        self.at_top() && self.current.ops.is_empty()
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.cursor = self.top();
    }

    fn page_break(&mut self) {
        if !self.is_blank() {
            self.new_page();
        }
    }

    fn place_spacer(&mut self, height: f32) {
        if height > self.remaining() {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn place_paragraph(&mut self, p: &Paragraph) {
        let style = &p.style;
        let lines = p.wrap(self.width());

        if !self.at_top() && style.space_before > 0.0 {
            if style.space_before >= self.remaining() {
                self.new_page();
            } else {
                self.cursor -= style.space_before;
            }
        }

        for line in &lines {
            if self.remaining() < style.leading && !self.at_top() {
                self.new_page();
            }
            let x = self.line_x(line, style.alignment);
            self.current.ops.push(DrawOp::Text {
                x,
                y: self.cursor - style.font_size,
                font: style.font,
                size: style.font_size,
                color: style.text_color,
                text: line.text.clone(),
            });
            self.cursor -= style.leading;
        }

        self.cursor = (self.cursor - style.space_after).max(self.bottom());
    }

    fn line_x(&self, line: &Line, alignment: Alignment) -> f32 {
        match alignment {
            Alignment::Left => self.left(),
            Alignment::Center => self.left() + (self.width() - line.width) / 2.0,
            Alignment::Right => self.left() + self.width() - line.width,
        }
    }

    fn place_table(&mut self, table: &Table) {
        let mut batch: Vec<RowSlice> = Vec::new();
        let mut used = 0.0;

        for row in 0..table.rows.len() {
            let mut cells = table.wrap_row(row);
            loop {
                let height = table.cells_height(&cells);
                let room = self.remaining() - used;
                if height <= room {
                    batch.push(RowSlice { row, cells, height });
                    used += height;
                    break;
                }
                if !batch.is_empty() || !self.at_top() {
                    self.draw_table_rows(table, &mut batch);
                    used = 0.0;
                    self.new_page();
                    continue;
                }
                // Taller than a whole frame: split the row between lines.
                let chrome = table.lines_height(0);
                let fit = (((room - chrome) / table.style.leading).floor() as usize).max(1);
                let rest: Vec<Vec<Line>> = cells
                    .iter_mut()
                    .map(|c| c.split_off(fit.min(c.len())))
                    .collect();
                batch.push(RowSlice {
                    row,
                    cells,
                    height: table.lines_height(fit),
                });
                self.draw_table_rows(table, &mut batch);
                used = 0.0;
                self.new_page();
                cells = rest;
            }
        }
        self.draw_table_rows(table, &mut batch);
    }

    /// Draw the queued slices at the cursor and empty the queue.
    fn draw_table_rows(&mut self, table: &Table, batch: &mut Vec<RowSlice>) {
        if batch.is_empty() {
            return;
        }
        let slices = std::mem::take(batch);
        let style = &table.style;
        let table_width = table.width();
        let x0 = self.left() + (self.width() - table_width) / 2.0;
        let top = self.cursor;

        // Backgrounds first so text and rules paint over them.
        let mut y = top;
        for slice in &slices {
            let h = slice.height;
            let background = if slice.row == 0 {
                style.header_background
            } else {
                style.body_background
            };
            if let Some(color) = background {
                self.current.ops.push(DrawOp::FillRect {
                    x: x0,
                    y: y - h,
                    width: table_width,
                    height: h,
                    color,
                });
            }
            y -= h;
        }
        let bottom = y;

        let mut y = top;
        for slice in &slices {
            let color = if slice.row == 0 {
                style.header_text
            } else {
                style.body_text
            };
            let mut x = x0;
            for (cell, width) in slice.cells.iter().zip(&table.col_widths) {
                let mut baseline = y - style.padding.top - style.font_size;
                for line in cell {
                    self.current.ops.push(DrawOp::Text {
                        x: x + style.padding.left,
                        y: baseline,
                        font: style.font,
                        size: style.font_size,
                        color,
                        text: line.text.clone(),
                    });
                    baseline -= style.leading;
                }
                x += width;
            }
            y -= slice.height;
        }

        if let Some(grid) = style.grid {
            let mut y = top;
            for slice in &slices {
                self.current.ops.push(DrawOp::Line {
                    x1: x0,
                    y1: y,
                    x2: x0 + table_width,
                    y2: y,
                    line_width: grid.width,
                    color: grid.color,
                });
                y -= slice.height;
            }
            self.current.ops.push(DrawOp::Line {
                x1: x0,
                y1: bottom,
                x2: x0 + table_width,
                y2: bottom,
                line_width: grid.width,
                color: grid.color,
            });
            let mut x = x0;
            for width in std::iter::once(&0.0).chain(&table.col_widths) {
                x += width;
                self.current.ops.push(DrawOp::Line {
                    x1: x,
                    y1: top,
                    x2: x,
                    y2: bottom,
                    line_width: grid.width,
                    color: grid.color,
                });
            }
        }

        if let Some(outline) = style.outline {
            self.current.ops.push(DrawOp::StrokeRect {
                x: x0,
                y: bottom,
                width: table_width,
                height: top - bottom,
                line_width: outline.width,
                color: outline.color,
            });
        }

        self.cursor = bottom;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::{ParagraphStyle, TableStyle};

    fn body() -> ParagraphStyle {
        ParagraphStyle::new("Body", Font::Helvetica, 12.0, 16.0)
    }

    #[test]
    fn empty_story_yields_one_page() {
        let pages = paginate(&[], &PageGeometry::A4);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].ops.is_empty());
    }

    #[test]
    fn page_break_starts_new_page() {
        let story = vec![
            Flowable::Paragraph(Paragraph::new("cover", body())),
            Flowable::PageBreak,
            Flowable::Paragraph(Paragraph::new("summary", body())),
        ];
        let pages = paginate(&story, &PageGeometry::A4);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].texts().collect::<Vec<_>>(), vec!["cover"]);
        assert_eq!(pages[1].texts().collect::<Vec<_>>(), vec!["summary"]);
    }

    #[test]
    fn page_break_on_blank_page_is_ignored() {
        let story = vec![
            Flowable::PageBreak,
            Flowable::Paragraph(Paragraph::new("first", body())),
        ];
        assert_eq!(paginate(&story, &PageGeometry::A4).len(), 1);
    }

    #[test]
    fn text_stays_inside_margins() {
        let story: Vec<Flowable> = (0..200)
            .map(|i| Flowable::Paragraph(Paragraph::new(format!("line {i}"), body())))
            .collect();
        let g = PageGeometry::A4;
        let pages = paginate(&story, &g);
        assert!(pages.len() > 1);
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { x, y, .. } = op {
                    assert!(*x >= g.margin - 1e-3);
                    assert!(*y >= g.margin - 1e-3, "baseline {y} below margin");
                    assert!(*y <= g.height - g.margin);
                }
            }
        }
        let total: usize = pages.iter().map(|p| p.texts().count()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn long_paragraph_splits_across_pages_in_order() {
        let text = (0..120)
            .map(|i| format!("row{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let story = vec![Flowable::Paragraph(Paragraph::with_line_breaks(&text, body()))];
        let pages = paginate(&story, &PageGeometry::A4);
        assert!(pages.len() >= 2);
        let all: Vec<&str> = pages.iter().flat_map(|p| p.texts()).collect();
        let expected: Vec<String> = (0..120).map(|i| format!("row{i}")).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn centered_line_is_centered() {
        let style = body().aligned(Alignment::Center);
        let story = vec![Flowable::Paragraph(Paragraph::new("abc", style))];
        let g = PageGeometry::A4;
        let pages = paginate(&story, &g);
        let DrawOp::Text { x, .. } = &pages[0].ops[0] else {
            panic!("expected text op");
        };
        let w = crate::layout::font::text_width("abc", Font::Helvetica, 12.0);
        assert!((x - (g.margin + (g.frame_width() - w) / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn table_splits_between_rows_and_draws_outline_per_page() {
        let rows: Vec<Vec<String>> = (0..80)
            .map(|i| vec![format!("k{i}"), format!("v{i}")])
            .collect();
        let style = TableStyle {
            outline: Some(crate::layout::style::Stroke {
                width: 1.0,
                color: Color::BLACK,
            }),
            ..TableStyle::default()
        };
        let table = Table::new(rows, vec![140.0, 320.0], style);
        let pages = paginate(&[Flowable::Table(table)], &PageGeometry::A4);
        assert!(pages.len() >= 2);
        for page in &pages {
            let outlines = page
                .ops
                .iter()
                .filter(|op| matches!(op, DrawOp::StrokeRect { .. }))
                .count();
            assert_eq!(outlines, 1);
        }
        let keys: Vec<&str> = pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| t.starts_with('k'))
            .collect();
        assert_eq!(keys.len(), 80);
        assert_eq!(keys[79], "k79");
    }

    #[test]
    fn oversized_spacer_moves_to_next_page() {
        let story = vec![
            Flowable::Paragraph(Paragraph::new("a", body())),
            Flowable::Spacer(10_000.0),
            Flowable::Paragraph(Paragraph::new("b", body())),
        ];
        let pages = paginate(&story, &PageGeometry::A4);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].texts().next(), Some("b"));
    }

    #[test]
    fn row_taller_than_a_page_splits_between_lines() {
        let words = (0..3000).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let rows = vec![
            vec!["Source".to_string(), "Lisbon".to_string()],
            vec!["Destination".to_string(), words],
            vec!["Budget".to_string(), "EUR 400".to_string()],
        ];
        let table = Table::new(rows, vec![140.0, 320.0], TableStyle::default());
        let expected_lines = table.wrap_row(1)[1].len();
        let g = PageGeometry::A4;
        let pages = paginate(&[Flowable::Table(table)], &g);
        assert!(pages.len() > 2, "got {} pages", pages.len());

        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y >= g.margin - 1e-3, "baseline {y} below margin");
                }
            }
        }
        let all: Vec<&str> = pages.iter().flat_map(|p| p.texts()).collect();
        let value_lines = all.iter().filter(|t| t.starts_with('w')).count();
        assert_eq!(value_lines, expected_lines);
        assert_eq!(all.first(), Some(&"Source"));
        assert_eq!(all.last(), Some(&"EUR 400"));
        let first_word = all.iter().position(|t| t.starts_with("w0 ")).unwrap();
        let last_word = all.iter().position(|t| t.ends_with("w2999")).unwrap();
        assert!(first_word < last_word);
    }
}
