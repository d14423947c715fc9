use std::sync::Arc;

use crate::engine::Recommender;

/// Shared application state
///
/// Everything behind the engine is loaded once at startup and read-only
/// afterwards, so plain `Arc` sharing suffices; no locks.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Recommender>,
}

impl AppState {
    pub fn new(engine: Recommender) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
