//! # travel-itinerary
//!
//! Turn a handful of trip parameters into a day-by-day travel itinerary
//! written by a language model, delivered as plain text and as a styled A4
//! PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! TripRequest
//!  │
//!  ├─ 1. Check    credential present, trip details in range
//!  ├─ 2. Prompt   fixed template filled from the request
//!  ├─ 3. Generate one call to Gemini (or any edgequake-llm provider)
//!  ├─ 4. Render   cover · summary table · itinerary paragraphs → PDF
//!  └─ 5. Output   travel_itinerary.pdf + travel_itinerary.txt
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use travel_itinerary::{plan_trip, PlannerConfig, TripDetails, TripRequest};
//! use travel_itinerary::trip::{Accommodation, Currency, Language, TravelStyle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlannerConfig::builder().api_key_from_env().build()?;
//!     let request = TripRequest::new(TripDetails {
//!         source: "New York".into(),
//!         destination: "Los Angeles".into(),
//!         date: "2026-11-02".into(),
//!         duration: 7,
//!         budget: 1000,
//!         currency: Currency::Usd,
//!         language: Language::English,
//!         accommodation_preference: Accommodation::Hotel,
//!         travel_style: TravelStyle::Relaxed,
//!     });
//!     let plan = plan_trip(request, &config).await?;
//!     println!("{}", plan.itinerary);
//!     std::fs::write("travel_itinerary.pdf", &plan.pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering without a model
//!
//! The renderer is pure and needs no credential:
//!
//! ```rust
//! use travel_itinerary::{render_itinerary, TripDetails};
//! # use travel_itinerary::trip::*;
//! # let details = TripDetails {
//! #     source: "Lisbon".into(), destination: "Porto".into(), date: "2026-06-01".into(),
//! #     duration: 3, budget: 400, currency: Currency::Eur, language: Language::English,
//! #     accommodation_preference: Accommodation::Hostel, travel_style: TravelStyle::Relaxed,
//! # };
//! let pdf = render_itinerary(&details, "Day 1\nArrive\n\nDay 2\nExplore").unwrap();
//! assert_eq!(pdf.position(), 0);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tripplan` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod progress;
pub mod prompts;
pub mod trip;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ApiKey, PlannerConfig, PlannerConfigBuilder};
pub use error::ItineraryError;
pub use output::{Artifact, PlanStats, TripPlan};
pub use pipeline::llm::{Generation, ItineraryModel, ProviderModel};
pub use pipeline::render::{render_document, render_itinerary, RenderedDocument};
pub use plan::{plan_trip, plan_trip_sync, plan_trip_to_dir};
pub use progress::{NoopProgressCallback, PlanningProgressCallback, ProgressCallback};
pub use trip::{ImageAttachment, Preferences, TripDetails, TripRequest};
