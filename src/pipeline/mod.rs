//! Pipeline stages for itinerary planning.
//!
//! Each submodule implements exactly one step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ encode ──▶ llm ──▶ render
//! (image)    (base64)   (model)  (PDF)
//! ```
//!
//! 1. [`input`]: load the optional PNG/JPEG reference image
//! 2. [`encode`]: base64-wrap the image for the request body
//! 3. [`llm`]: one call to the model; the only stage with network I/O
//! 4. [`render`]: lay the trip summary and itinerary out as an A4 PDF

pub mod encode;
pub mod input;
pub mod llm;
pub mod render;
