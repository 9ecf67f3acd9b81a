//! Progress-callback trait for planning events.
//!
//! Inject an [`Arc<dyn PlanningProgressCallback>`] via
//! [`crate::config::PlannerConfigBuilder::progress_callback`] to hear about
//! the two slow stages of a plan: the remote generation call and rendering.
//!
//! # Example
//!
//! ```rust
//! use travel_itinerary::{PlannerConfig, PlanningProgressCallback};
//! use std::sync::Arc;
//!
//! struct Stderr;
//!
//! impl PlanningProgressCallback for Stderr {
//!     fn on_generation_start(&self, model: &str) {
//!         eprintln!("asking {model}…");
//!     }
//! }
//!
//! let config = PlannerConfig::builder()
//!     .api_key("test-key")
//!     .progress_callback(Arc::new(Stderr) as Arc<dyn PlanningProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the planning pipeline at stage boundaries.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait PlanningProgressCallback: Send + Sync {
    /// Called just before the request is sent to the model.
    fn on_generation_start(&self, model: &str) {
        let _ = model;
    }

    /// Called when the model has returned the itinerary.
    ///
    /// # Arguments
    /// * `chars`: length of the itinerary text in characters
    fn on_generation_complete(&self, chars: usize) {
        let _ = chars;
    }

    /// Called once the PDF has been rendered.
    ///
    /// # Arguments
    /// * `pages`: page count of the rendered document
    /// * `bytes`: size of the PDF in bytes
    fn on_render_complete(&self, pages: usize, bytes: usize) {
        let _ = (pages, bytes);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl PlanningProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PlannerConfig`].
pub type ProgressCallback = Arc<dyn PlanningProgressCallback>;
