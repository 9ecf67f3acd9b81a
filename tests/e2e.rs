//! End-to-end tests against the live Gemini API.
//!
//! Gated behind the `E2E_ENABLED` environment variable and a real key in
//! `GOOGLE_API_KEY` / `GEMINI_API_KEY` (a `.env` file works too), so they do
//! not run in CI unless explicitly requested.
//!
//! Run with:
//!   E2E_ENABLED=1 cargo test --test e2e -- --nocapture

use std::path::PathBuf;
use travel_itinerary::output::{PDF_FILE_NAME, TXT_FILE_NAME};
use travel_itinerary::trip::{Accommodation, Currency, Language, TravelStyle};
use travel_itinerary::{plan_trip, plan_trip_to_dir, PlannerConfig, TripDetails, TripRequest};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn output_dir() -> PathBuf {
    let d = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/e2e-output");
    std::fs::create_dir_all(&d).ok();
    d
}

/// Skip this test unless E2E_ENABLED is set and a key is available.
macro_rules! e2e_config_or_skip {
    ($model:expr) => {{
        let _ = dotenvy::dotenv();
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP: set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let config = PlannerConfig::builder()
            .model($model)
            .api_key_from_env()
            .api_timeout_secs(180)
            .build()
            .expect("valid config");
        if config.api_key.is_none() {
            println!("SKIP: no GOOGLE_API_KEY / GEMINI_API_KEY");
            return;
        }
        config
    }};
}

fn short_trip() -> TripRequest {
    TripRequest::new(TripDetails {
        source: "Lisbon".into(),
        destination: "Porto".into(),
        date: "2026-06-01".into(),
        duration: 2,
        budget: 300,
        currency: Currency::Eur,
        language: Language::English,
        accommodation_preference: Accommodation::Hostel,
        travel_style: TravelStyle::Relaxed,
    })
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_flash_two_day_trip() {
    let config = e2e_config_or_skip!("gemini-2.5-flash");
    let plan = plan_trip(short_trip(), &config).await.expect("plan");

    assert!(!plan.itinerary.trim().is_empty());
    assert!(
        plan.itinerary.contains("\n\n"),
        "expected blank-line separated sections"
    );
    assert!(plan.stats.page_count >= 2);
    println!(
        "{} pages, {} tokens in / {} out, {}ms",
        plan.stats.page_count,
        plan.stats.input_tokens,
        plan.stats.output_tokens,
        plan.stats.total_ms
    );
}

#[tokio::test]
async fn test_write_artifacts() {
    let config = e2e_config_or_skip!("gemini-2.5-flash");
    let dir = output_dir();
    plan_trip_to_dir(short_trip(), &dir, &config)
        .await
        .expect("plan to dir");
    assert!(dir.join(PDF_FILE_NAME).exists());
    assert!(dir.join(TXT_FILE_NAME).exists());
    println!("Artifacts in {}", dir.display());
}
