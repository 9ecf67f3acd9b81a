//! Configuration types for itinerary planning.
//!
//! Everything a plan needs besides the trip itself lives in
//! [`PlannerConfig`], built via [`PlannerConfigBuilder`]. The API key is an
//! explicit value on the config; the library never reads the environment on
//! its own. Call [`PlannerConfigBuilder::api_key_from_env`] (the CLI does) to
//! opt into `GOOGLE_API_KEY` / `GEMINI_API_KEY`.

use crate::error::ItineraryError;
use crate::pipeline::llm::ItineraryModel;
use crate::progress::{PlanningProgressCallback, ProgressCallback};
use std::fmt;
use std::sync::Arc;

/// Provider used when none is named.
pub const DEFAULT_PROVIDER: &str = "gemini";

/// Model used when none is named.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini models offered by the CLI. Other names are passed through as-is.
pub const KNOWN_GEMINI_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
];

/// Environment variables checked, in order, for the API key.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

// ── ApiKey ───────────────────────────────────────────────────────────────

/// The model credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// `None` for an empty or blank key.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Explicit value first, then each of [`API_KEY_ENV_VARS`] via `lookup`.
    pub fn resolve<F>(explicit: Option<&str>, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = explicit.and_then(ApiKey::new) {
            return Some(key);
        }
        API_KEY_ENV_VARS
            .iter()
            .find_map(|var| lookup(var).and_then(ApiKey::new))
    }

    /// Resolve from the process environment only.
    pub fn from_env() -> Option<Self> {
        Self::resolve(None, |var| std::env::var(var).ok())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

// ── PlannerConfig ────────────────────────────────────────────────────────

/// Configuration for a planning run.
///
/// # Example
/// ```rust
/// use travel_itinerary::PlannerConfig;
///
/// let config = PlannerConfig::builder()
///     .api_key("my-key")
///     .model("gemini-2.5-pro")
///     .api_timeout_secs(90)
///     .build()
///     .unwrap();
/// assert_eq!(config.model, "gemini-2.5-pro");
/// ```
#[derive(Clone)]
pub struct PlannerConfig {
    /// Model credential. Required for the Gemini provider and for injected
    /// clients; see [`PlannerConfig::requires_api_key`].
    pub api_key: Option<ApiKey>,

    /// `"gemini"` (default) uses `edgequake_llm::GeminiProvider` with
    /// [`Self::api_key`]. Any other name is
    /// handed to `edgequake_llm::ProviderFactory`, which reads that
    /// provider's own key from the environment.
    pub provider_name: String,

    /// Model identifier. Default: `gemini-2.5-flash`.
    pub model: String,

    /// Sampling temperature. `None` leaves the provider default.
    pub temperature: Option<f32>,

    /// Output token cap. `None` leaves the provider default.
    pub max_tokens: Option<usize>,

    /// Per-call timeout for the model request. `None` waits indefinitely.
    pub api_timeout_secs: Option<u64>,

    /// Pre-constructed model. Takes precedence over `provider_name`.
    pub model_client: Option<Arc<dyn ItineraryModel>>,

    pub progress_callback: Option<ProgressCallback>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider_name: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
            api_timeout_secs: None,
            model_client: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("api_key", &self.api_key)
            .field("provider_name", &self.provider_name)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field(
                "model_client",
                &self.model_client.as_ref().map(|_| "<dyn ItineraryModel>"),
            )
            .finish()
    }
}

impl PlannerConfig {
    pub fn builder() -> PlannerConfigBuilder {
        PlannerConfigBuilder {
            config: Self::default(),
        }
    }

    /// True unless a non-Gemini `edgequake-llm` provider is selected.
    pub fn requires_api_key(&self) -> bool {
        self.model_client.is_some() || self.provider_name.eq_ignore_ascii_case(DEFAULT_PROVIDER)
    }

    /// Whether `model` is one of [`KNOWN_GEMINI_MODELS`].
    pub fn is_known_model(&self) -> bool {
        KNOWN_GEMINI_MODELS.contains(&self.model.as_str())
    }
}

/// Builder for [`PlannerConfig`].
#[derive(Debug)]
pub struct PlannerConfigBuilder {
    config: PlannerConfig,
}

impl PlannerConfigBuilder {
    /// Set the key explicitly. A blank value clears it.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = ApiKey::new(key);
        self
    }

    /// Fill the key from `GOOGLE_API_KEY` / `GEMINI_API_KEY` if none is set.
    pub fn api_key_from_env(self) -> Self {
        self.api_key_with_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`Self::api_key_from_env`] with a custom variable lookup.
    pub fn api_key_with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.config.api_key.is_none() {
            self.config.api_key = ApiKey::resolve(None, lookup);
        }
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = name.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = Some(t);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = Some(secs);
        self
    }

    pub fn model_client(mut self, client: Arc<dyn ItineraryModel>) -> Self {
        self.config.model_client = Some(client);
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn PlanningProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// A missing API key is not a build error; it is reported by
    /// [`crate::plan_trip`] before any remote call.
    pub fn build(self) -> Result<PlannerConfig, ItineraryError> {
        let c = &self.config;
        if let Some(t) = c.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ItineraryError::InvalidConfig(format!(
                    "temperature must be 0.0–2.0, got {t}"
                )));
            }
        }
        if c.model.trim().is_empty() {
            return Err(ItineraryError::InvalidConfig("model must not be empty".into()));
        }
        if c.provider_name.trim().is_empty() {
            return Err(ItineraryError::InvalidConfig(
                "provider name must not be empty".into(),
            ));
        }
        if c.max_tokens == Some(0) {
            return Err(ItineraryError::InvalidConfig("max_tokens must be ≥ 1".into()));
        }
        if c.api_timeout_secs == Some(0) {
            return Err(ItineraryError::InvalidConfig(
                "api timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
