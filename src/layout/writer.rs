//! Serialise laid-out pages into a PDF byte buffer with `lopdf`.
//!
//! The writer adds no creation date, modification date or `/ID`, and
//! objects are numbered in a fixed order, so the same pages always produce
//! the same bytes. Content streams are left uncompressed.

use super::font::{encode, Font};
use super::frame::{DrawOp, Page, PageGeometry};
use super::style::Color;
use crate::error::ItineraryError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

/// Entries for the document information dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: String,
    pub creator: String,
}

/// Serialise `pages` into a complete PDF.
pub fn write_pdf(
    pages: &[Page],
    geometry: &PageGeometry,
    info: &DocumentInfo,
) -> Result<Vec<u8>, ItineraryError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let mut dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
        };
        if font.uses_win_ansi() {
            dict.set("Encoding", "WinAnsiEncoding");
        }
        let id = doc.add_object(dict);
        fonts.set(font.resource_name(), id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page);
        let encoded = content
            .encode()
            .map_err(|e| ItineraryError::RenderFailed(format!("content stream: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(geometry.width),
                Object::Real(geometry.height),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(&info.title),
        "Subject" => text_string(&info.subject),
        "Creator" => text_string(&info.creator),
        "Producer" => text_string(concat!("travel-itinerary ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| ItineraryError::RenderFailed(format!("serialisation: {e}")))?;
    debug!("Wrote PDF: {} pages, {} bytes", pages.len(), buf.len());
    Ok(buf)
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn text_string(s: &str) -> Object {
    if s.is_ascii() {
        Object::string_literal(s)
    } else {
        let mut bytes = vec![0xfe, 0xff];
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

fn real(v: f32) -> Object {
    // Two decimals are plenty for layout and keep streams readable.
    Object::Real((v * 100.0).round() / 100.0)
}

fn color_operands(c: Color) -> Vec<Object> {
    vec![real(c.r), real(c.g), real(c.b)]
}

fn page_content(page: &Page) -> Content {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                let runs = encode(text, *font);
                if runs.is_empty() {
                    continue;
                }
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Td", vec![real(*x), real(*y)]));
                for run in runs {
                    ops.push(Operation::new(
                        "Tf",
                        vec![run.font.resource_name().into(), real(*size)],
                    ));
                    ops.push(Operation::new(
                        "Tj",
                        vec![Object::String(run.bytes, StringFormat::Literal)],
                    ));
                }
                ops.push(Operation::new("ET", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                line_width,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![real(*line_width)]));
                ops.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                line_width,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![real(*line_width)]));
                ops.push(Operation::new("m", vec![real(*x1), real(*y1)]));
                ops.push(Operation::new("l", vec![real(*x2), real(*y2)]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    Content { operations: ops }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page(text: &str) -> Page {
        Page {
            ops: vec![
                DrawOp::FillRect {
                    x: 40.0,
                    y: 700.0,
                    width: 100.0,
                    height: 20.0,
                    color: Color::from_hex(0x1a73e8),
                },
                DrawOp::Text {
                    x: 46.0,
                    y: 705.0,
                    font: Font::Helvetica,
                    size: 10.0,
                    color: Color::WHITE,
                    text: text.to_string(),
                },
            ],
        }
    }

    #[test]
    fn writes_loadable_pdf() {
        let pages = vec![sample_page("Hello"), sample_page("World")];
        let bytes = write_pdf(&pages, &PageGeometry::A4, &DocumentInfo::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let doc = Document::load_mem(&bytes).expect("valid pdf");
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn output_is_deterministic() {
        let pages = vec![sample_page("Same")];
        let info = DocumentInfo {
            title: "Trip to Zürich".into(),
            subject: "s".into(),
            creator: "c".into(),
        };
        let a = write_pdf(&pages, &PageGeometry::A4, &info).unwrap();
        let b = write_pdf(&pages, &PageGeometry::A4, &info).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn text_is_drawn_with_tj() {
        let content = page_content(&sample_page("(Paren) test"));
        let tj: Vec<&Operation> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .collect();
        assert_eq!(tj.len(), 1);
        match &tj[0].operands[0] {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"(Paren) test"),
            other => panic!("unexpected operand {other:?}"),
        }
    }

    #[test]
    fn non_ascii_info_is_utf16() {
        match text_string("Zürich") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xfe, 0xff]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
