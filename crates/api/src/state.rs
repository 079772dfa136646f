use crate::services::AprService;
use std::sync::Arc;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub apr: Arc<AprService>,
}

impl AppState {
    pub fn new(apr: AprService) -> Self {
        Self { apr: Arc::new(apr) }
    }
}
