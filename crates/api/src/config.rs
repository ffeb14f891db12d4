use rostrum_core::debate::{validate_max_conversations, DEFAULT_MAX_CONVERSATIONS};
use rostrum_llm::LlmConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90`). Must exceed twice the
    /// LLM timeout, since a free-text turn may make a rebuttal and a report
    /// call.
    pub request_timeout_secs: u64,
    /// Exchanges per free-text debate when the client does not ask for a
    /// specific number (default: `7`).
    pub default_max_conversations: i32,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// Completion provider settings.
    pub llm: LlmConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `90`                       |
    /// | `DEBATE_MAX_CONVERSATIONS` | `7`                        |
    ///
    /// JWT and LLM settings are documented on [`JwtConfig::from_env`] and
    /// [`LlmConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_max_conversations: i32 = std::env::var("DEBATE_MAX_CONVERSATIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONVERSATIONS.to_string())
            .parse()
            .expect("DEBATE_MAX_CONVERSATIONS must be a valid i32");
        let default_max_conversations = validate_max_conversations(default_max_conversations)
            .unwrap_or_else(|e| panic!("DEBATE_MAX_CONVERSATIONS: {e}"));

        let llm = LlmConfig::from_env();
        check_timeouts(request_timeout_secs, llm.timeout_secs)
            .unwrap_or_else(|e| panic!("REQUEST_TIMEOUT_SECS: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_max_conversations,
            jwt: JwtConfig::from_env(),
            llm,
        }
    }
}

/// The request timeout must leave room for two full LLM calls.
fn check_timeouts(request_timeout_secs: u64, llm_timeout_secs: u64) -> Result<(), String> {
    if request_timeout_secs <= 2 * llm_timeout_secs {
        return Err(format!(
            "{request_timeout_secs}s must be greater than twice LLM_TIMEOUT_SECS ({llm_timeout_secs}s)"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_timeout_must_cover_two_llm_calls() {
        assert!(check_timeouts(60, 30).is_err());
        assert!(check_timeouts(59, 30).is_err());
        assert!(check_timeouts(61, 30).is_ok());
        assert!(check_timeouts(90, 30).is_ok());
    }
}
