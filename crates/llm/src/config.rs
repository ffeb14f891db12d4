//! LLM configuration loaded from environment variables.

use std::sync::Arc;
use std::time::Duration;

use crate::openai::OpenAiClient;
use crate::provider::{CompletionProvider, UnconfiguredProvider};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the completion provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key; `None` disables the provider and forces fallbacks.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                     |
    /// |--------------------|-----------------------------|
    /// | `LLM_API_KEY`      | unset (provider disabled)   |
    /// | `LLM_BASE_URL`     | `https://api.openai.com/v1` |
    /// | `LLM_MODEL`        | `gpt-4o-mini`               |
    /// | `LLM_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Self {
        let api_key = std::env::var("LLM_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url = std::env::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            model,
            timeout_secs,
        }
    }
}

/// Build the provider described by `config`.
///
/// Without an API key, or if the HTTP client cannot be built, returns the
/// [`UnconfiguredProvider`] so the service still runs on fallbacks.
pub fn build_provider(config: &LlmConfig) -> Arc<dyn CompletionProvider> {
    let Some(api_key) = config.api_key.as_deref() else {
        tracing::warn!("LLM_API_KEY not set, debate replies will use fixed fallbacks");
        return Arc::new(UnconfiguredProvider);
    };

    match OpenAiClient::new(
        api_key,
        config.base_url.as_str(),
        config.model.as_str(),
        Duration::from_secs(config.timeout_secs),
    ) {
        Ok(client) => {
            tracing::info!(model = %config.model, base_url = %config.base_url, "LLM provider configured");
            Arc::new(client)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build LLM client, using fallbacks");
            Arc::new(UnconfiguredProvider)
        }
    }
}
