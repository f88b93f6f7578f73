use std::sync::Arc;

use crate::config::Config;
use crate::planner::CareerEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup; shared by every request without locking.
    pub engine: Arc<CareerEngine>,
    pub config: Config,
}

impl AppState {
    pub fn new(engine: CareerEngine, config: Config) -> Self {
        Self {
            engine: Arc::new(engine),
            config,
        }
    }
}
