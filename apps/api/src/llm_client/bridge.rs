//! Provider Bridge: resolves one generation request against the configured
//! providers in fallback order.
//!
//! The primary is tried first; any failure is logged and the same request is
//! handed to the secondary. There is exactly one fallback hop: no retries, no
//! backoff, no caching.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm_client::anthropic::AnthropicClient;
use crate::llm_client::openai::OpenAiClient;
use crate::llm_client::{GenerateOptions, Prompt, ProviderKind, TextGenerator};

/// Successful generation, tagged with the provider that served it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderResponse {
    pub text: String,
    pub provider: ProviderKind,
    pub latency_ms: u64,
}

/// One failed attempt inside a bridge call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderFailure {
    pub provider: ProviderKind,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("no language model provider could serve the request: {}", summarize(.failures))]
    ProviderUnavailable { failures: Vec<ProviderFailure> },
}

fn summarize(failures: &[ProviderFailure]) -> String {
    if failures.is_empty() {
        return "no providers configured".to_string();
    }
    failures
        .iter()
        .map(|f| format!("{}: {}", f.provider, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub struct ProviderBridge {
    /// Fallback order. At most a primary and a secondary.
    providers: Vec<Arc<dyn TextGenerator>>,
}

impl ProviderBridge {
    pub fn new(
        primary: Option<Arc<dyn TextGenerator>>,
        secondary: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            providers: primary.into_iter().chain(secondary).collect(),
        }
    }

    /// Builds the bridge from startup configuration: OpenAI first, Anthropic
    /// second. A provider without an API key is left out of the order.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let primary = match &config.openai {
            Some(settings) => Some(Arc::new(OpenAiClient::new(
                settings.api_key.clone(),
                settings.model.clone(),
                config.provider_timeout,
            )?) as Arc<dyn TextGenerator>),
            None => None,
        };

        let secondary = match &config.anthropic {
            Some(settings) => Some(Arc::new(AnthropicClient::new(
                settings.api_key.clone(),
                settings.model.clone(),
                config.provider_timeout,
            )?) as Arc<dyn TextGenerator>),
            None => None,
        };

        Ok(Self::new(primary, secondary))
    }

    /// Providers in the order they will be tried.
    pub fn providers(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    pub fn has_fallback(&self) -> bool {
        self.providers.len() > 1
    }

    pub async fn generate(
        &self,
        prompt: &Prompt,
        options: &GenerateOptions,
    ) -> Result<ProviderResponse, BridgeError> {
        let mut failures = Vec::new();

        for provider in &self.providers {
            let kind = provider.kind();
            let started = Instant::now();
            let result = provider.generate(prompt, options).await;
            let latency_ms = started.elapsed().as_millis() as u64;

            match result {
                Ok(text) => {
                    info!(provider = %kind, outcome = "success", latency_ms, "provider attempt");
                    return Ok(ProviderResponse {
                        text,
                        provider: kind,
                        latency_ms,
                    });
                }
                Err(e) => {
                    warn!(
                        provider = %kind,
                        outcome = "failure",
                        latency_ms,
                        error = %e,
                        "provider attempt"
                    );
                    failures.push(ProviderFailure {
                        provider: kind,
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(BridgeError::ProviderUnavailable { failures })
    }
}
