//! Output types: the finished plan, its stats and its downloadable artifacts.

use crate::error::ItineraryError;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the rendered PDF.
pub const PDF_FILE_NAME: &str = "travel_itinerary.pdf";
/// Media type of the rendered PDF.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
/// File name of the raw itinerary text.
pub const TXT_FILE_NAME: &str = "travel_itinerary.txt";
/// Media type of the raw itinerary text.
pub const TXT_MEDIA_TYPE: &str = "text/plain";

/// Result of a successful planning run.
#[derive(Debug, Clone)]
pub struct TripPlan {
    /// Model output, verbatim.
    pub itinerary: String,
    /// Rendered PDF bytes.
    pub pdf: Vec<u8>,
    pub stats: PlanStats,
}

/// Timing and size figures for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub page_count: usize,
    pub pdf_bytes: usize,
    pub generation_ms: u64,
    pub render_ms: u64,
    pub total_ms: u64,
}

/// A named, typed download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact<'a> {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub bytes: &'a [u8],
}

impl TripPlan {
    /// The PDF followed by the plain-text itinerary.
    pub fn artifacts(&self) -> [Artifact<'_>; 2] {
        [
            Artifact {
                file_name: PDF_FILE_NAME,
                media_type: PDF_MEDIA_TYPE,
                bytes: &self.pdf,
            },
            Artifact {
                file_name: TXT_FILE_NAME,
                media_type: TXT_MEDIA_TYPE,
                bytes: self.itinerary.as_bytes(),
            },
        ]
    }

    /// The PDF as a reader positioned at the start.
    pub fn pdf_reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.pdf.as_slice())
    }

    /// Write every artifact into `dir`, creating it if needed.
    ///
    /// Each file is written atomically (temp file + rename). Returns the
    /// written paths in artifact order.
    pub async fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ItineraryError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ItineraryError::OutputWriteFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;

        let mut written = Vec::with_capacity(2);
        for artifact in self.artifacts() {
            let path = dir.join(artifact.file_name);
            write_atomic(&path, artifact.bytes).await?;
            debug!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
            written.push(path);
        }
        Ok(written)
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ItineraryError> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, bytes)
        .await
        .map_err(|e| ItineraryError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ItineraryError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn plan() -> TripPlan {
        TripPlan {
            itinerary: "Day 1\n\nDay 2".into(),
            pdf: b"%PDF-1.4 fake".to_vec(),
            stats: PlanStats::default(),
        }
    }

    #[test]
    fn artifacts_are_named_and_typed() {
        let plan = plan();
        let [pdf, txt] = plan.artifacts();
        assert_eq!(pdf.file_name, "travel_itinerary.pdf");
        assert_eq!(pdf.media_type, "application/pdf");
        assert_eq!(pdf.bytes, plan.pdf.as_slice());
        assert_eq!(txt.file_name, "travel_itinerary.txt");
        assert_eq!(txt.media_type, "text/plain");
        assert_eq!(txt.bytes, b"Day 1\n\nDay 2");
    }

    #[test]
    fn pdf_reader_starts_at_zero() {
        let plan = plan();
        let mut reader = plan.pdf_reader();
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, plan.pdf);
    }

    #[tokio::test]
    async fn write_to_dir_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let paths = plan().write_to_dir(&out).await.unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(std::fs::read(out.join(PDF_FILE_NAME)).unwrap(), b"%PDF-1.4 fake");
        assert_eq!(
            std::fs::read_to_string(out.join(TXT_FILE_NAME)).unwrap(),
            "Day 1\n\nDay 2"
        );
        // No temp files left behind.
        let names: Vec<_> = std::fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn stats_serialise_to_json() {
        let stats = PlanStats {
            model: "gemini-2.5-flash".into(),
            page_count: 3,
            ..Default::default()
        };
        let v = serde_json::to_value(&stats).unwrap();
        assert_eq!(v["model"], "gemini-2.5-flash");
        assert_eq!(v["page_count"], 3);
    }
}
