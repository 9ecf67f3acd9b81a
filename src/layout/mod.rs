//! A small flowable layout engine for fixed-format PDF documents.
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Flowable> ──▶ frame::paginate ──▶ Vec<Page> ──▶ writer::write_pdf ──▶ bytes
//!   (story)          (wrap + split)     (draw ops)      (lopdf)
//! ```
//!
//! 1. [`flowable`]: story elements (spacer, paragraph, page break, table)
//!    and greedy word wrapping
//! 2. [`frame`]: places the story into margin-bounded frames, splitting
//!    paragraphs between lines and tables between rows
//! 3. [`writer`]: serialises draw operations to PDF content streams
//!
//! [`font`] and [`style`] hold the metrics and typography the other stages
//! share.

pub mod flowable;
pub mod font;
pub mod frame;
pub mod style;
pub mod writer;

pub use flowable::{Flowable, Inline, Line, Paragraph, Table};
pub use font::Font;
pub use frame::{paginate, DrawOp, Page, PageGeometry};
pub use style::{Alignment, Color, ParagraphStyle, StyleSheet, TableStyle};
pub use writer::DocumentInfo;

use crate::error::ItineraryError;
use tracing::debug;

/// A finished document.
#[derive(Debug, Clone)]
pub struct BuiltDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Page geometry plus document metadata; builds a story into a PDF.
#[derive(Debug, Clone)]
pub struct DocTemplate {
    pub geometry: PageGeometry,
    pub info: DocumentInfo,
}

impl DocTemplate {
    pub fn new(geometry: PageGeometry, info: DocumentInfo) -> Self {
        Self { geometry, info }
    }

    pub fn build(&self, story: &[Flowable]) -> Result<BuiltDocument, ItineraryError> {
        let pages = paginate(story, &self.geometry);
        debug!("Laid out {} flowables on {} pages", story.len(), pages.len());
        let bytes = writer::write_pdf(&pages, &self.geometry, &self.info)?;
        Ok(BuiltDocument {
            bytes,
            page_count: pages.len(),
        })
    }
}
