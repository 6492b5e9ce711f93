use std::sync::Arc;

use crate::config::Config;
use crate::interview::driver::ConversationDriver;
use crate::interview::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<ConversationDriver>,
    pub sessions: SessionStore,
    pub config: Config,
}
