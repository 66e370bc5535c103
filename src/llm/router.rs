//! Provider selection by credential probing.
//!
//! Exactly one backend is chosen per process: the first, in fixed priority order, whose
//! API key is present. There is no fallback to another backend once a call fails.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{MODEL_ENV_VAR, non_empty_var};
use crate::error::ProviderError;

use super::anthropic::AnthropicClient;
use super::fence::strip_fence;
use super::gemini::GeminiClient;
use super::openai::OpenAiClient;

/// Supported text-generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
    Anthropic,
}

impl Provider {
    /// Probe order used by [`resolve`].
    pub const PRIORITY: [Provider; 3] = [Provider::Gemini, Provider::OpenAi, Provider::Anthropic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }

    /// Environment variables holding this backend's API key, in lookup order.
    pub fn credential_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            Provider::OpenAi => &["OPENAI_API_KEY"],
            Provider::Anthropic => &["ANTHROPIC_API_KEY"],
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-1.5-pro-latest",
            Provider::OpenAi => "gpt-4-turbo-2024-04-09",
            Provider::Anthropic => "claude-3-opus-20240229",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-shot text generation capability.
///
/// This abstraction allows mocking the backends in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` with a budget of `max_tokens` and return the response text.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError>;
}

/// The resolved backend for this process, with response cleanup applied.
pub struct ProviderHandle {
    provider: Provider,
    model: String,
    backend: Box<dyn TextGenerator>,
}

impl ProviderHandle {
    pub fn new(provider: Provider, model: impl Into<String>, backend: Box<dyn TextGenerator>) -> Self {
        Self {
            provider,
            model: model.into(),
            backend,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TextGenerator for ProviderHandle {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError> {
        debug!(
            "Prompting {} ({}) with {} chars, budget {} tokens",
            self.provider,
            self.model,
            prompt.len(),
            max_tokens
        );
        let raw = self.backend.generate(prompt, max_tokens).await?;
        Ok(strip_fence(&raw))
    }
}

/// Resolve the provider from the process environment.
pub fn resolve() -> Result<ProviderHandle, ProviderError> {
    resolve_with(non_empty_var)
}

/// Resolve the provider using `lookup` to read variables.
///
/// Blank values count as absent. Building the client performs no network I/O; an invalid
/// key surfaces on the first real call.
pub fn resolve_with<F>(lookup: F) -> Result<ProviderHandle, ProviderError>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    for provider in Provider::PRIORITY {
        let Some(api_key) = provider.credential_vars().iter().find_map(|var| present(var)) else {
            continue;
        };

        let model = present(MODEL_ENV_VAR).unwrap_or_else(|| provider.default_model().to_string());
        debug!("Selected {} provider with model {}", provider, model);

        let backend: Box<dyn TextGenerator> = match provider {
            Provider::Gemini => Box::new(GeminiClient::new(api_key, model.clone())?),
            Provider::OpenAi => Box::new(OpenAiClient::new(api_key, model.clone())?),
            Provider::Anthropic => Box::new(AnthropicClient::new(api_key, model.clone())?),
        };

        return Ok(ProviderHandle::new(provider, model, backend));
    }

    Err(ProviderError::NoProviderAvailable)
}
