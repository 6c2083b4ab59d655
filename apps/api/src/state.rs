use std::sync::Arc;

use crate::llm_client::TextModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The model handle shared by every run. Stateless; runs never share anything else.
    pub llm: Arc<dyn TextModel>,
}
