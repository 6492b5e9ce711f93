use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus the provider fallback order.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "talentscout-api",
        "providers": state.driver.bridge().providers(),
        "active_sessions": state.sessions.len().await,
        "max_technical_questions": state.config.max_technical_questions,
    }))
}
