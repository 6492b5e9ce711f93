mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::interview::driver::ConversationDriver;
use crate::interview::store::SessionStore;
use crate::llm_client::ProviderBridge;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentScout API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize provider bridge (OpenAI primary, Anthropic fallback)
    let bridge = ProviderBridge::from_config(&config)?;
    let providers = bridge.providers();
    if providers.is_empty() {
        warn!("No LLM provider configured: set OPENAI_API_KEY and/or ANTHROPIC_API_KEY. Turns will return 503.");
    } else {
        info!(
            ?providers,
            fallback = bridge.has_fallback(),
            timeout_secs = config.provider_timeout.as_secs(),
            "Provider bridge initialized"
        );
    }

    let driver = ConversationDriver::new(Arc::new(bridge), config.max_technical_questions);
    info!(
        "Conversation driver initialized (max technical questions: {})",
        config.max_technical_questions
    );

    // Build app state
    let state = AppState {
        driver: Arc::new(driver),
        sessions: SessionStore::new(config.session_ttl),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the chat front-end origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
