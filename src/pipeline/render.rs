//! Document assembly: trip details + itinerary text → styled A4 PDF.
//!
//! The layout is fixed:
//!
//! ```text
//! page 1   spacer · title · spacer · 4 subtitle lines · spacer · PAGE BREAK
//! page 2+  "Trip Summary" · 8-row table · spacer
//!          "Detailed Itinerary" · (paragraph · spacer) × N
//! ```
//!
//! The itinerary text is split on the literal blank-line delimiter
//! [`PARAGRAPH_DELIMITER`] and nothing else. Inside a paragraph each `\n`
//! becomes an explicit line break. Text the model did not split degrades to
//! one long paragraph.
//!
//! Rendering is pure and deterministic: the same input always produces the
//! same bytes, so output can be cached or diffed.

use crate::error::ItineraryError;
use crate::layout::{
    font, DocTemplate, DocumentInfo, Flowable, PageGeometry, Paragraph, StyleSheet, Table,
};
use crate::trip::TripDetails;
use std::io::Cursor;
use tracing::{debug, info, warn};

/// Cover title.
pub const TITLE: &str = "✈️ AI Travel Itinerary";
/// Heading above the summary table.
pub const SUMMARY_HEADING: &str = "Trip Summary";
/// Heading above the itinerary paragraphs.
pub const ITINERARY_HEADING: &str = "Detailed Itinerary";
/// Separates paragraphs in the model's output.
pub const PARAGRAPH_DELIMITER: &str = "\n\n";

/// Summary table column widths in points.
pub const SUMMARY_COL_WIDTHS: [f32; 2] = [140.0, 320.0];

const COVER_TOP_SPACE: f32 = 40.0;
const TITLE_GAP: f32 = 15.0;
const COVER_BOTTOM_SPACE: f32 = 40.0;
const SUMMARY_GAP: f32 = 20.0;
const PARAGRAPH_GAP: f32 = 10.0;

/// A rendered itinerary PDF.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl RenderedDocument {
    /// The bytes as a reader positioned at the start.
    pub fn into_cursor(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes)
    }
}

/// Render the itinerary PDF and return it as a buffer ready to stream.
pub fn render_itinerary(
    details: &TripDetails,
    itinerary: &str,
) -> Result<Cursor<Vec<u8>>, ItineraryError> {
    render_document(details, itinerary).map(RenderedDocument::into_cursor)
}

/// Render the itinerary PDF, keeping the page count.
pub fn render_document(
    details: &TripDetails,
    itinerary: &str,
) -> Result<RenderedDocument, ItineraryError> {
    let missing = font::count_missing(itinerary);
    if missing > 0 {
        warn!(
            "{} itinerary characters have no glyph in the standard PDF fonts and will print as '?'",
            missing
        );
    }

    let story = build_story(details, itinerary);
    let template = DocTemplate::new(
        PageGeometry::A4,
        DocumentInfo {
            title: format!("Travel Itinerary: {} to {}", details.source, details.destination),
            subject: format!("{} trip starting {}", details.duration_label(), details.date),
            creator: "tripplan".into(),
        },
    );
    let built = template.build(&story)?;
    info!(
        "Rendered itinerary PDF: {} pages, {} bytes",
        built.page_count,
        built.bytes.len()
    );

    Ok(RenderedDocument {
        bytes: built.bytes,
        page_count: built.page_count,
    })
}

/// The 8 summary rows, in table order.
pub fn summary_rows(details: &TripDetails) -> Vec<(&'static str, String)> {
    vec![
        ("Source", details.source.clone()),
        ("Destination", details.destination.clone()),
        ("Start Date", details.date.clone()),
        ("Duration", details.duration_label()),
        ("Budget", details.budget_label()),
        ("Language", details.language.to_string()),
        ("Accommodation", details.accommodation_preference.to_string()),
        ("Travel Style", details.travel_style.to_string()),
    ]
}

/// The four centered lines under the cover title.
pub fn cover_lines(details: &TripDetails) -> [String; 4] {
    [
        format!("{} → {}", details.source, details.destination),
        format!("Start: {}", details.date),
        format!("Duration: {}", details.duration_label()),
        format!("Budget: {}", details.budget_label()),
    ]
}

/// Split the itinerary on [`PARAGRAPH_DELIMITER`].
///
/// Empty or whitespace-only text has no paragraphs. Otherwise every piece is
/// kept, in order, even blank ones.
pub fn split_paragraphs(itinerary: &str) -> Vec<&str> {
    if itinerary.trim().is_empty() {
        return Vec::new();
    }
    itinerary.split(PARAGRAPH_DELIMITER).collect()
}

/// Assemble the flowable story for the document.
pub fn build_story(details: &TripDetails, itinerary: &str) -> Vec<Flowable> {
    let styles = StyleSheet::itinerary();
    let mut story = Vec::new();

    // ── Cover ────────────────────────────────────────────────────────────
    story.push(Flowable::Spacer(COVER_TOP_SPACE));
    story.push(Flowable::Paragraph(Paragraph::new(TITLE, styles.title.clone())));
    story.push(Flowable::Spacer(TITLE_GAP));
    for line in cover_lines(details) {
        story.push(Flowable::Paragraph(Paragraph::new(
            line,
            styles.subtitle.clone(),
        )));
    }
    story.push(Flowable::Spacer(COVER_BOTTOM_SPACE));
    story.push(Flowable::PageBreak);

    // ── Summary ──────────────────────────────────────────────────────────
    story.push(Flowable::Paragraph(Paragraph::new(
        SUMMARY_HEADING,
        styles.heading.clone(),
    )));
    let rows = summary_rows(details)
        .into_iter()
        .map(|(label, value)| vec![label.to_string(), value])
        .collect();
    story.push(Flowable::Table(Table::new(
        rows,
        SUMMARY_COL_WIDTHS.to_vec(),
        styles.summary_table.clone(),
    )));
    story.push(Flowable::Spacer(SUMMARY_GAP));

    // ── Itinerary ────────────────────────────────────────────────────────
    story.push(Flowable::Paragraph(Paragraph::new(
        ITINERARY_HEADING,
        styles.heading.clone(),
    )));
    let paragraphs = split_paragraphs(itinerary);
    debug!("Itinerary has {} paragraphs", paragraphs.len());
    for text in paragraphs {
        story.push(Flowable::Paragraph(Paragraph::with_line_breaks(
            text,
            styles.body.clone(),
        )));
        story.push(Flowable::Spacer(PARAGRAPH_GAP));
    }

    story
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Inline;
    use crate::trip::{Accommodation, Currency, Language, TravelStyle};
    use std::io::Read;

    fn details() -> TripDetails {
        TripDetails {
            source: "New York".into(),
            destination: "Los Angeles".into(),
            date: "2026-10-16".into(),
            duration: 7,
            budget: 1000,
            currency: Currency::Usd,
            language: Language::English,
            accommodation_preference: Accommodation::Apartment,
            travel_style: TravelStyle::FastPaced,
        }
    }

    fn itinerary_paragraphs(story: &[Flowable]) -> Vec<&Paragraph> {
        let heading_idx = story
            .iter()
            .position(|f| {
                f.as_paragraph()
                    .is_some_and(|p| p.plain_text() == ITINERARY_HEADING)
            })
            .expect("itinerary heading present");
        story[heading_idx + 1..]
            .iter()
            .filter_map(Flowable::as_paragraph)
            .collect()
    }

    #[test]
    fn summary_rows_are_fixed_and_formatted() {
        let rows = summary_rows(&details());
        let labels: Vec<&str> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec![
                "Source",
                "Destination",
                "Start Date",
                "Duration",
                "Budget",
                "Language",
                "Accommodation",
                "Travel Style"
            ]
        );
        assert_eq!(rows[3].1, "7 days");
        assert_eq!(rows[4].1, "USD 1000");
        assert_eq!(rows[6].1, "Apartment");
        assert_eq!(rows[7].1, "Fast-Paced");
    }

    #[test]
    fn cover_lines_format() {
        let lines = cover_lines(&details());
        assert_eq!(lines[0], "New York → Los Angeles");
        assert_eq!(lines[1], "Start: 2026-10-16");
        assert_eq!(lines[2], "Duration: 7 days");
        assert_eq!(lines[3], "Budget: USD 1000");
    }

    #[test]
    fn split_on_blank_line_only() {
        assert_eq!(split_paragraphs("a\nb\n\nc"), vec!["a\nb", "c"]);
        assert_eq!(split_paragraphs("single block"), vec!["single block"]);
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs(" \n\n \n").is_empty());
    }

    #[test]
    fn story_has_single_page_break_after_cover() {
        let story = build_story(&details(), "Day 1");
        let breaks: Vec<usize> = story
            .iter()
            .enumerate()
            .filter(|(_, f)| matches!(f, Flowable::PageBreak))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(breaks.len(), 1);
        // Summary heading immediately follows the break.
        assert_eq!(
            story[breaks[0] + 1].as_paragraph().map(Paragraph::plain_text),
            Some(SUMMARY_HEADING.to_string())
        );
    }

    #[test]
    fn paragraphs_preserved_in_order_with_line_breaks() {
        let text = "Day 1\nMorning: Louvre\nEvening: Seine\n\nDay 2\nVersailles\n\nTravel Checklist";
        let story = build_story(&details(), text);
        let paras = itinerary_paragraphs(&story);
        assert_eq!(paras.len(), 3);
        assert_eq!(paras[0].plain_text(), "Day 1\nMorning: Louvre\nEvening: Seine");
        assert_eq!(paras[0].line_breaks(), 2);
        assert_eq!(paras[1].plain_text(), "Day 2\nVersailles");
        assert_eq!(paras[2].plain_text(), "Travel Checklist");
        assert!(paras[0]
            .content
            .iter()
            .any(|i| matches!(i, Inline::LineBreak)));
    }

    #[test]
    fn empty_itinerary_has_no_paragraphs() {
        let story = build_story(&details(), "");
        assert!(itinerary_paragraphs(&story).is_empty());
        let table = story.iter().find_map(Flowable::as_table).unwrap();
        assert_eq!(table.rows.len(), 8);
    }

    #[test]
    fn render_returns_rewound_pdf() {
        let mut cursor = render_itinerary(&details(), "Day 1\nArrive").unwrap();
        assert_eq!(cursor.position(), 0);
        let mut head = [0u8; 5];
        cursor.read_exact(&mut head).unwrap();
        assert_eq!(&head, b"%PDF-");
    }

    #[test]
    fn render_is_deterministic() {
        let a = render_document(&details(), "Day 1\n\nDay 2").unwrap();
        let b = render_document(&details(), "Day 1\n\nDay 2").unwrap();
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.page_count, 2);
    }

    #[test]
    fn blank_fields_still_render() {
        let mut d = details();
        d.source.clear();
        d.destination.clear();
        d.date.clear();
        assert!(render_document(&d, "").is_ok());
    }
}
