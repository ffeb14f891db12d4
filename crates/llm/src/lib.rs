//! Text-completion client for debate rebuttals and reports.
//!
//! - [`provider`] -- the [`CompletionProvider`] trait, request type, and the
//!   provider used when no API key is configured.
//! - [`openai`] -- client for OpenAI-compatible `/chat/completions` endpoints.
//! - [`mock`] -- scripted provider for tests.
//! - [`config`] -- environment configuration and provider construction.

pub mod config;
pub mod error;
pub mod mock;
pub mod openai;
pub mod provider;

pub use config::{build_provider, LlmConfig};
pub use error::LlmError;
pub use provider::{CompletionProvider, CompletionRequest};
