use std::sync::Arc;

use crate::llm_client::ChatCompletion;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Opened once at startup, closed on shutdown.
    pub store: Arc<dyn DocumentStore>,
    pub llm: Arc<dyn ChatCompletion>,
}
