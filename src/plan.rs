//! Planning entry points: trip request in, itinerary text and PDF out.
//!
//! The pipeline is strictly sequential and fails fast. The credential is
//! checked before anything else, so a misconfigured run never reaches the
//! model and never renders a document.

use crate::config::{ApiKey, PlannerConfig, DEFAULT_PROVIDER};
use crate::error::ItineraryError;
use crate::output::{PlanStats, TripPlan};
use crate::pipeline::llm::{Generation, ItineraryModel, ProviderModel};
use crate::pipeline::render;
use crate::prompts;
use crate::trip::TripRequest;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Generate an itinerary for `request` and render it to PDF.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Every failure is fatal; there is no partial plan:
/// - [`ItineraryError::MissingCredential`] before any remote call
/// - [`ItineraryError::InvalidTripDetails`] for empty or out-of-range fields
/// - model errors (`AuthError`, `RateLimitExceeded`, `LlmApiError`,
///   `ApiTimeout`, `ProviderNotConfigured`) as returned by the call
/// - [`ItineraryError::RenderFailed`] if the PDF could not be serialised
pub async fn plan_trip(
    request: TripRequest,
    config: &PlannerConfig,
) -> Result<TripPlan, ItineraryError> {
    let total_start = Instant::now();
    info!(
        "Planning trip: {} → {} ({})",
        request.details.source,
        request.details.destination,
        request.details.duration_label()
    );

    // ── Step 1: Credential ───────────────────────────────────────────────
    let api_key = if config.requires_api_key() {
        Some(config.api_key.clone().ok_or(ItineraryError::MissingCredential)?)
    } else {
        None
    };

    // ── Step 2: Validate trip details ────────────────────────────────────
    request.details.validate()?;

    // ── Step 3: Build prompt ─────────────────────────────────────────────
    let prompt = prompts::build_prompt(&request);
    debug!("Prompt: {} chars", prompt.chars().count());

    // ── Step 4: Resolve model ────────────────────────────────────────────
    let model = resolve_model(config, api_key)?;
    let model_name = model.model_name().to_string();

    // ── Step 5: Generate ─────────────────────────────────────────────────
    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_start(&model_name);
    }
    let generation_start = Instant::now();
    let generation = generate(model.as_ref(), &prompt, &request, config.api_timeout_secs).await?;
    let generation_ms = generation_start.elapsed().as_millis() as u64;
    info!(
        "Generated itinerary with {}: {} chars in {}ms",
        model_name,
        generation.text.chars().count(),
        generation_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_complete(generation.text.chars().count());
    }

    // ── Step 6: Render ───────────────────────────────────────────────────
    let render_start = Instant::now();
    let rendered = render::render_document(&request.details, &generation.text)?;
    let render_ms = render_start.elapsed().as_millis() as u64;
    if let Some(ref cb) = config.progress_callback {
        cb.on_render_complete(rendered.page_count, rendered.bytes.len());
    }

    let stats = PlanStats {
        model: model_name,
        input_tokens: generation.input_tokens,
        output_tokens: generation.output_tokens,
        page_count: rendered.page_count,
        pdf_bytes: rendered.bytes.len(),
        generation_ms,
        render_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Plan complete: {} pages, {} bytes, {}ms total",
        stats.page_count, stats.pdf_bytes, stats.total_ms
    );

    Ok(TripPlan {
        itinerary: generation.text,
        pdf: rendered.bytes,
        stats,
    })
}

/// Plan a trip and write both artifacts into `dir`.
///
/// Files are written atomically (temp file + rename); nothing is written if
/// planning fails.
pub async fn plan_trip_to_dir(
    request: TripRequest,
    dir: impl AsRef<Path>,
    config: &PlannerConfig,
) -> Result<TripPlan, ItineraryError> {
    let plan = plan_trip(request, config).await?;
    plan.write_to_dir(dir).await?;
    Ok(plan)
}

/// Synchronous wrapper around [`plan_trip`].
///
/// Creates a temporary tokio runtime internally.
pub fn plan_trip_sync(
    request: TripRequest,
    config: &PlannerConfig,
) -> Result<TripPlan, ItineraryError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ItineraryError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(plan_trip(request, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Pick the model, from most-specific to least-specific.
///
/// 1. **Injected client** (`config.model_client`): used as-is.
/// 2. **Gemini** (`provider_name == "gemini"`): `edgequake_llm::GeminiProvider`
///    with the configured key.
/// 3. **Any other name**: created through `edgequake_llm::ProviderFactory`.
fn resolve_model(
    config: &PlannerConfig,
    api_key: Option<ApiKey>,
) -> Result<Arc<dyn ItineraryModel>, ItineraryError> {
    if let Some(ref client) = config.model_client {
        return Ok(Arc::clone(client));
    }

    if config.provider_name.eq_ignore_ascii_case(DEFAULT_PROVIDER) {
        let key = api_key.ok_or(ItineraryError::MissingCredential)?;
        if !config.is_known_model() {
            warn!("'{}' is not a known Gemini model; sending as-is", config.model);
        }
        let model = ProviderModel::gemini(&key, &config.model)
            .with_generation_options(config.temperature, config.max_tokens);
        return Ok(Arc::new(model));
    }

    let model = ProviderModel::create(&config.provider_name, &config.model)?
        .with_generation_options(config.temperature, config.max_tokens);
    Ok(Arc::new(model))
}

async fn generate(
    model: &dyn ItineraryModel,
    prompt: &str,
    request: &TripRequest,
    timeout_secs: Option<u64>,
) -> Result<Generation, ItineraryError> {
    let call = model.generate(prompt, request.image.as_ref());
    match timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), call)
            .await
            .map_err(|_| ItineraryError::ApiTimeout { secs })?,
        None => call.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_is_resolved_with_the_configured_key() {
        let config = PlannerConfig::builder()
            .api_key("test-key")
            .model("gemini-2.5-pro")
            .build()
            .unwrap();
        let model = resolve_model(&config, config.api_key.clone()).unwrap();
        assert_eq!(model.model_name(), "gemini-2.5-pro");
    }

    #[test]
    fn gemini_without_key_is_missing_credential() {
        let config = PlannerConfig::default();
        let err = resolve_model(&config, None).err().unwrap();
        assert!(matches!(err, ItineraryError::MissingCredential));
    }
}
