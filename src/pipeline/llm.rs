//! Model interaction: send the prompt (and optional image), get text back.
//!
//! [`ItineraryModel`] is the seam between the pipeline and whatever answers
//! the prompt. [`ProviderModel`] implements it over any `edgequake_llm`
//! provider. Gemini (the default) is `edgequake_llm::GeminiProvider` built
//! with the configured key; every other provider comes from
//! `ProviderFactory` and reads its own key from the environment.
//!
//! One request, one response. No retry and no fallback text: a failed call
//! surfaces as an [`ItineraryError`] and nothing is rendered.

use crate::config::ApiKey;
use crate::error::ItineraryError;
use crate::pipeline::encode;
use crate::trip::ImageAttachment;
use async_trait::async_trait;
use edgequake_llm::{
    ChatMessage, CompletionOptions, GeminiProvider, LLMProvider, LlmError, ProviderFactory,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Text returned by a model plus token accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Anything that turns a prompt into itinerary text.
#[async_trait]
pub trait ItineraryModel: Send + Sync {
    /// Model identifier, for logs and stats.
    fn model_name(&self) -> &str;

    /// Send one request and return the complete response text.
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<Generation, ItineraryError>;
}

/// Any `edgequake_llm` chat provider.
pub struct ProviderModel {
    provider: Arc<dyn LLMProvider>,
    model: String,
    options: CompletionOptions,
}

impl ProviderModel {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            options: CompletionOptions::default(),
        }
    }

    /// Google AI Gemini with an explicit key. Images travel as `inline_data`.
    pub fn gemini(api_key: &ApiKey, model: &str) -> Self {
        let provider = GeminiProvider::new(api_key.expose()).with_model(model);
        Self::new(Arc::new(provider), model)
    }

    /// Instantiate a named provider via [`ProviderFactory::create_llm_provider`].
    ///
    /// The factory reads the provider's own API key from the environment.
    pub fn create(provider_name: &str, model: &str) -> Result<Self, ItineraryError> {
        let provider = ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
            ItineraryError::ProviderNotConfigured {
                provider: provider_name.to_string(),
                hint: format!("{e}"),
            }
        })?;
        Ok(Self::new(provider, model))
    }

    pub fn with_generation_options(
        mut self,
        temperature: Option<f32>,
        max_tokens: Option<usize>,
    ) -> Self {
        self.options = CompletionOptions {
            temperature,
            max_tokens,
            ..Default::default()
        };
        self
    }

    fn messages(prompt: &str, image: Option<&ImageAttachment>) -> Vec<ChatMessage> {
        match image {
            Some(img) => vec![ChatMessage::user_with_images(
                prompt,
                vec![encode::to_image_data(img)],
            )],
            None => vec![ChatMessage::user(prompt)],
        }
    }
}

#[async_trait]
impl ItineraryModel for ProviderModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<Generation, ItineraryError> {
        let messages = Self::messages(prompt, image);
        debug!(
            "{} request: model={}, prompt={} chars, image={}",
            self.provider.name(),
            self.model,
            prompt.chars().count(),
            image.is_some()
        );
        let response = self
            .provider
            .chat(&messages, Some(&self.options))
            .await
            .map_err(|e| map_llm_error(self.provider.name(), e))?;

        if response.content.trim().is_empty() {
            warn!(
                "{} returned an empty itinerary (finish reason: {})",
                self.model,
                response.finish_reason.as_deref().unwrap_or("unknown")
            );
        }
        debug!(
            "{}: {} input tokens, {} output tokens",
            self.model, response.prompt_tokens, response.completion_tokens
        );
        Ok(Generation {
            text: response.content,
            input_tokens: response.prompt_tokens as u64,
            output_tokens: response.completion_tokens as u64,
        })
    }
}

// ── Error mapping ────────────────────────────────────────────────────────

/// Translate a provider error into the planner's error type.
///
/// Providers that report HTTP failures as `ApiError("... error (403): ...")`
/// (Gemini does) are classified by the status code in the message.
pub fn map_llm_error(provider: &str, err: LlmError) -> ItineraryError {
    warn!("{provider} call failed: {err}");
    match err {
        LlmError::AuthError(detail) => ItineraryError::AuthError {
            provider: provider.to_string(),
            detail,
        },
        LlmError::RateLimited(_) => ItineraryError::RateLimitExceeded {
            provider: provider.to_string(),
            retry_after_secs: None,
        },
        LlmError::ApiError(message) => match http_status(&message) {
            Some(401 | 403) => ItineraryError::AuthError {
                provider: provider.to_string(),
                detail: status_detail(&message).to_string(),
            },
            Some(429) => ItineraryError::RateLimitExceeded {
                provider: provider.to_string(),
                retry_after_secs: None,
            },
            _ => ItineraryError::LlmApiError { message },
        },
        other => ItineraryError::LlmApiError {
            message: other.to_string(),
        },
    }
}

/// Status code from `"... error (NNN): ..."` or `"... error (NNN Reason): ..."`.
fn http_status(message: &str) -> Option<u16> {
    let (_, rest) = message.split_once("error (")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// The text after the status, or the whole message.
fn status_detail(message: &str) -> &str {
    message
        .split_once("): ")
        .map(|(_, detail)| detail)
        .unwrap_or(message)
}
