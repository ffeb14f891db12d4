//! Completion provider trait and request type.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::LlmError;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion length cap, in tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// One text-completion call: a system instruction plus a user prompt.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Build from a `(system, user)` prompt pair.
    pub fn from_pair((system, prompt): (String, String)) -> Self {
        Self::new(system, prompt)
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A black-box text-completion service.
#[async_trait]
pub trait CompletionProvider: Send + Sync + std::fmt::Debug {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Return the completion text for `request`.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// Provider used when no API key is configured. Every call fails, so the
/// debate flow always takes its fallback path.
#[derive(Debug, Default)]
pub struct UnconfiguredProvider;

#[async_trait]
impl CompletionProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let req = CompletionRequest::new("sys", "hi")
            .with_max_tokens(800)
            .with_temperature(0.2);
        assert_eq!(req.max_tokens, 800);
        assert!((req.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn unconfigured_provider_always_fails() {
        let result = UnconfiguredProvider
            .complete(CompletionRequest::new("sys", "hi"))
            .await;
        assert!(matches!(result, Err(LlmError::NotConfigured)));
    }
}
