use std::sync::Arc;

use crate::catalog::Catalog;
use crate::guidance::workflows::GuidanceSettings;
use crate::llm_client::GuidanceClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated, so readers need no locking.
    pub catalog: Arc<Catalog>,
    /// Text-generation backend. `HuggingFaceClient` in production, a stub in tests.
    pub guidance: Arc<dyn GuidanceClient>,
    pub settings: GuidanceSettings,
}
