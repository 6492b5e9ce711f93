use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{anthropic, openai};

/// Credentials and model for one upstream provider.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

/// Application configuration, resolved once at startup from environment
/// variables. A provider whose API key is missing or empty is disabled.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: Option<ProviderSettings>,
    pub anthropic: Option<ProviderSettings>,
    /// Per-request bound for provider calls; a timeout counts as a failure
    /// for fallback purposes.
    pub provider_timeout: Duration,
    /// Number of technical questions asked before the interview closes.
    pub max_technical_questions: usize,
    /// Idle time after which a session is evicted from the store.
    pub session_ttl: chrono::Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = |key_var: &str, model_var: &str, default_model: &str| {
            optional(key_var).map(|api_key| ProviderSettings {
                api_key,
                model: optional(model_var).unwrap_or_else(|| default_model.to_string()),
            })
        };

        let provider_timeout_secs = optional("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?;

        let max_technical_questions = optional("MAX_TECHNICAL_QUESTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<usize>()
            .context("MAX_TECHNICAL_QUESTIONS must be a positive integer")?;
        if max_technical_questions == 0 {
            bail!("MAX_TECHNICAL_QUESTIONS must be at least 1");
        }

        let session_ttl_minutes = optional("SESSION_TTL_MINUTES")
            .unwrap_or_else(|| "60".to_string())
            .parse::<i64>()
            .context("SESSION_TTL_MINUTES must be a whole number of minutes")?;
        if session_ttl_minutes < 1 {
            bail!("SESSION_TTL_MINUTES must be at least 1");
        }

        Ok(Config {
            openai: provider("OPENAI_API_KEY", "OPENAI_MODEL", openai::DEFAULT_MODEL),
            anthropic: provider(
                "ANTHROPIC_API_KEY",
                "ANTHROPIC_MODEL",
                anthropic::DEFAULT_MODEL,
            ),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            max_technical_questions,
            session_ttl: chrono::Duration::minutes(session_ttl_minutes),
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|_| None).expect("defaults are valid")
    }
}
