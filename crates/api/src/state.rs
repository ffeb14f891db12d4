use std::sync::Arc;

use rostrum_llm::CompletionProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rostrum_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Text-completion provider for rebuttals and free-text reports.
    pub llm: Arc<dyn CompletionProvider>,
}
