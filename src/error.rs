//! Error type for the travel-itinerary library.
//!
//! Every failure in this crate is fatal to the request that hit it: there is
//! no partial itinerary, no fallback text and no retry. A single enum,
//! [`ItineraryError`], covers the three places things can go wrong:
//!
//! * **Before the remote call**: missing credential, invalid trip details,
//!   unreadable image. Nothing has been sent and nothing has been rendered.
//! * **The remote call**: transport errors, auth failures, rate limits,
//!   timeouts. Propagated as-is to the caller.
//! * **After the remote call**: the PDF writer could not serialise the
//!   document, or the artifacts could not be written to disk.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the travel-itinerary library.
#[derive(Debug, Error)]
pub enum ItineraryError {
    // ── Pre-flight errors ─────────────────────────────────────────────────
    /// No API credential was configured. Detected before any remote call.
    #[error(
        "API key missing.\n\
Set GOOGLE_API_KEY (or GEMINI_API_KEY) in the environment or in a .env file,\n\
or pass it explicitly with --api-key."
    )]
    MissingCredential,

    /// A required trip field is empty or out of range.
    #[error("Invalid trip details: {field} {reason}")]
    InvalidTripDetails { field: &'static str, reason: String },

    /// The optional image was not found at the given path.
    #[error("Image file not found: '{path}'")]
    ImageNotFound { path: PathBuf },

    /// Process does not have read permission on the image.
    #[error("Permission denied reading image '{path}'")]
    ImagePermissionDenied { path: PathBuf },

    /// The image is neither PNG nor JPEG.
    #[error("Unsupported image format: {detail}\nOnly PNG and JPEG images are accepted.")]
    UnsupportedImage { detail: String },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider could not be instantiated.
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The LLM API returned an error, or its response could not be read.
    #[error("LLM API error: {message}")]
    LlmApiError { message: String },

    /// The LLM API rejected the credential (401/403).
    #[error("Authentication error from provider '{provider}': {detail}")]
    AuthError { provider: String, detail: String },

    /// The LLM API returned HTTP 429.
    #[error("Rate limit exceeded for provider '{provider}'")]
    RateLimitExceeded {
        provider: String,
        retry_after_secs: Option<u64>,
    },

    /// The LLM call exceeded the configured timeout.
    #[error("API call timed out after {secs}s")]
    ApiTimeout { secs: u64 },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The PDF writer could not serialise the document.
    #[error("Failed to render itinerary PDF: {0}")]
    RenderFailed(String),

    /// Could not create or write an output artifact.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ItineraryError {
    /// True for errors raised before anything was sent to the model.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            ItineraryError::MissingCredential
                | ItineraryError::InvalidTripDetails { .. }
                | ItineraryError::ImageNotFound { .. }
                | ItineraryError::ImagePermissionDenied { .. }
                | ItineraryError::UnsupportedImage { .. }
                | ItineraryError::InvalidConfig(_)
        )
    }
}
