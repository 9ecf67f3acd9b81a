//! Standard Type 1 fonts and text encoding.
//!
//! Only PDF base-14 fonts are used, so nothing is embedded and the output
//! stays small and reproducible. Body text is set in Helvetica or
//! Helvetica-Bold with `WinAnsiEncoding`. Characters outside WinAnsi fall
//! back to a glyph from Symbol (arrows, comparison signs) or ZapfDingbats
//! (✈, ✓, ★). Anything else is drawn as `?`.
//!
//! Widths are in thousandths of an em, taken from the Adobe core font
//! metrics.

/// A font available to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    Symbol,
    ZapfDingbats,
}

impl Font {
    /// Every font, in resource-name order.
    pub const ALL: [Font; 4] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::Symbol,
        Font::ZapfDingbats,
    ];

    /// PostScript name written as `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::Symbol => "Symbol",
            Font::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::Symbol => "F3",
            Font::ZapfDingbats => "F4",
        }
    }

    /// Symbol and ZapfDingbats carry their own built-in encoding.
    pub fn uses_win_ansi(self) -> bool {
        matches!(self, Font::Helvetica | Font::HelveticaBold)
    }

    /// Advance width of a single encoded byte, in 1/1000 em.
    pub fn glyph_width(self, code: u8) -> u16 {
        match self {
            Font::Helvetica => win_ansi_width(&HELVETICA_WIDTHS, code),
            Font::HelveticaBold => win_ansi_width(&HELVETICA_BOLD_WIDTHS, code),
            Font::Symbol => SYMBOL_GLYPHS
                .iter()
                .find(|(_, c, _)| *c == code)
                .map(|(_, _, w)| *w)
                .unwrap_or(500),
            Font::ZapfDingbats => DINGBAT_GLYPHS
                .iter()
                .find(|(_, c, _)| *c == code)
                .map(|(_, _, w)| *w)
                .unwrap_or(788),
        }
    }
}

fn win_ansi_width(table: &[u16; 224], code: u8) -> u16 {
    if code < 0x20 {
        return 0;
    }
    table[(code - 0x20) as usize]
}

/// A maximal stretch of text drawn with one font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub font: Font,
    /// Bytes in the font's own encoding, ready for a `Tj` operand.
    pub bytes: Vec<u8>,
}

impl Run {
    /// Advance width of the run at `size` points.
    pub fn width(&self, size: f32) -> f32 {
        let units: u32 = self
            .bytes
            .iter()
            .map(|&b| self.font.glyph_width(b) as u32)
            .sum();
        units as f32 * size / 1000.0
    }
}

/// How a single character ends up on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    /// Drawn with the given font and byte.
    Encoded(Font, u8),
    /// Zero-width formatting character; not drawn.
    Skip,
    /// No font can draw it.
    Missing,
}

fn glyph_for(c: char, text_font: Font) -> Glyph {
    match c {
        '\u{20}'..='\u{7e}' => Glyph::Encoded(text_font, c as u8),
        '\t' => Glyph::Encoded(text_font, b' '),
        '\u{a0}'..='\u{ff}' => Glyph::Encoded(text_font, c as u32 as u8),
        '\u{fe0f}' | '\u{fe0e}' | '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{feff}' => {
            Glyph::Skip
        }
        _ => {
            if let Some(&(_, code)) = WIN_ANSI_EXTRAS.iter().find(|(ch, _)| *ch == c) {
                return Glyph::Encoded(text_font, code);
            }
            if let Some(&(_, code, _)) = SYMBOL_GLYPHS.iter().find(|(ch, _, _)| *ch == c) {
                return Glyph::Encoded(Font::Symbol, code);
            }
            if let Some(&(_, code, _)) = DINGBAT_GLYPHS.iter().find(|(ch, _, _)| *ch == c) {
                return Glyph::Encoded(Font::ZapfDingbats, code);
            }
            Glyph::Missing
        }
    }
}

/// Encode `text` for drawing in `text_font`, splitting into runs wherever a
/// fallback font is needed.
pub fn encode(text: &str, text_font: Font) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for c in text.chars() {
        let (font, code) = match glyph_for(c, text_font) {
            Glyph::Encoded(font, code) => (font, code),
            Glyph::Skip => continue,
            Glyph::Missing => (text_font, b'?'),
        };
        match runs.last_mut() {
            Some(run) if run.font == font => run.bytes.push(code),
            _ => runs.push(Run {
                font,
                bytes: vec![code],
            }),
        }
    }
    runs
}

/// Width of `text` set in `text_font` at `size` points, fallbacks included.
pub fn text_width(text: &str, text_font: Font, size: f32) -> f32 {
    encode(text, text_font).iter().map(|r| r.width(size)).sum()
}

/// Number of characters in `text` that will be drawn as `?`.
pub fn count_missing(text: &str) -> usize {
    text.chars()
        .filter(|&c| glyph_for(c, Font::Helvetica) == Glyph::Missing)
        .count()
}

// ── Encoding tables ──────────────────────────────────────────────────────

/// Characters WinAnsi places in 0x80–0x9F.
const WIN_ANSI_EXTRAS: &[(char, u8)] = &[
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8a),
    ('‹', 0x8b),
    ('Œ', 0x8c),
    ('Ž', 0x8e),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9a),
    ('›', 0x9b),
    ('œ', 0x9c),
    ('ž', 0x9e),
    ('Ÿ', 0x9f),
];

/// (character, Symbol code, width)
const SYMBOL_GLYPHS: &[(char, u8, u16)] = &[
    ('→', 0xae, 987),
    ('←', 0xac, 987),
    ('↑', 0xad, 603),
    ('↓', 0xaf, 603),
    ('↔', 0xab, 1042),
    ('⇒', 0xde, 987),
    ('≤', 0xa3, 549),
    ('≥', 0xb3, 549),
    ('≠', 0xb9, 549),
    ('≈', 0xbb, 549),
    ('∞', 0xa5, 713),
];

/// (character, ZapfDingbats code, width)
const DINGBAT_GLYPHS: &[(char, u8, u16)] = &[
    ('✈', 0x28, 761),
    ('✉', 0x29, 690),
    ('✓', 0x33, 834),
    ('✔', 0x34, 874),
    ('★', 0x48, 816),
];

// ── Metrics ──────────────────────────────────────────────────────────────

/// Helvetica widths for WinAnsi codes 0x20–0xFF.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    // 0x20
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0x30
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 0x40
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 0x50
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 0x60
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 0x70
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    // 0x80
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 0x90
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica-Bold widths for WinAnsi codes 0x20–0xFF.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 224] = [
    // 0x20
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0x30
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    // 0x40
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    // 0x50
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    // 0x60
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    // 0x70
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
    // 0x80
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 0x90
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];
