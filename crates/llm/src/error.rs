/// Errors from a completion provider.
///
/// Callers in the debate flow never surface these; they log and substitute a
/// fixed fallback instead.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The provider answered but with no usable text.
    #[error("Provider returned an empty completion")]
    EmptyCompletion,

    /// No API key is configured.
    #[error("No LLM provider configured")]
    NotConfigured,

    /// Failure injected by a test provider.
    #[error("Provider failure: {0}")]
    Other(String),
}
