//! Colours, paragraph styles and table styles.

use super::font::Font;

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::from_hex(0x808080);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB` → colour.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

/// Horizontal placement of each line within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Typography for one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub name: &'static str,
    pub font: Font,
    pub font_size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    pub alignment: Alignment,
    pub text_color: Color,
    /// Ignored when the paragraph starts at the top of a page.
    pub space_before: f32,
    pub space_after: f32,
}

impl ParagraphStyle {
    pub fn new(name: &'static str, font: Font, font_size: f32, leading: f32) -> Self {
        Self {
            name,
            font,
            font_size,
            leading,
            alignment: Alignment::Left,
            text_color: Color::BLACK,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn spaced(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }
}

/// Cell padding in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 6.0,
            right: 6.0,
            top: 3.0,
            bottom: 3.0,
        }
    }
}

/// A stroked line style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

/// Styling for a [`super::flowable::Table`].
///
/// Row 0 is the header row; every other row is a body row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub font: Font,
    pub font_size: f32,
    pub leading: f32,
    pub padding: Padding,
    pub header_background: Option<Color>,
    pub header_text: Color,
    pub body_background: Option<Color>,
    pub body_text: Color,
    /// Lines between every cell.
    pub grid: Option<Stroke>,
    /// Outline around the whole table (per page when split).
    pub outline: Option<Stroke>,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font: Font::Helvetica,
            font_size: 10.0,
            leading: 12.0,
            padding: Padding::default(),
            header_background: None,
            header_text: Color::BLACK,
            body_background: None,
            body_text: Color::BLACK,
            grid: None,
            outline: None,
        }
    }
}

/// The accent blue used for the title and the summary header row.
pub const ACCENT: Color = Color::from_hex(0x1a73e8);
/// Light tint behind the summary body rows.
pub const TINT: Color = Color::from_hex(0xf0f4ff);

/// Named styles used by the itinerary document.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub title: ParagraphStyle,
    pub subtitle: ParagraphStyle,
    pub heading: ParagraphStyle,
    pub body: ParagraphStyle,
    pub summary_table: TableStyle,
}

impl StyleSheet {
    pub fn itinerary() -> Self {
        Self {
            title: ParagraphStyle::new("Title", Font::HelveticaBold, 28.0, 32.0)
                .aligned(Alignment::Center)
                .colored(ACCENT)
                .spaced(0.0, 6.0),
            subtitle: ParagraphStyle::new("Subtitle", Font::Helvetica, 14.0, 20.0)
                .aligned(Alignment::Center),
            heading: ParagraphStyle::new("Heading2", Font::HelveticaBold, 14.0, 18.0)
                .spaced(12.0, 6.0),
            body: ParagraphStyle::new("Body", Font::Helvetica, 12.0, 16.0),
            summary_table: TableStyle {
                header_background: Some(ACCENT),
                header_text: Color::WHITE,
                body_background: Some(TINT),
                grid: Some(Stroke {
                    width: 0.8,
                    color: Color::GREY,
                }),
                outline: Some(Stroke {
                    width: 1.0,
                    color: Color::BLACK,
                }),
                ..TableStyle::default()
            },
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::itinerary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours() {
        let c = Color::from_hex(0x1a73e8);
        assert!((c.r - 26.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 115.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 232.0 / 255.0).abs() < 1e-6);
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
    }

    #[test]
    fn itinerary_sheet() {
        let s = StyleSheet::itinerary();
        assert_eq!(s.title.alignment, Alignment::Center);
        assert_eq!(s.title.text_color, ACCENT);
        assert_eq!(s.body.font_size, 12.0);
        assert_eq!(s.body.leading, 16.0);
        assert_eq!(s.summary_table.header_text, Color::WHITE);
    }
}
