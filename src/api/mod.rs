pub mod handlers;
pub mod routes;
pub mod views;

pub use routes::*;

use crate::{quiz::QuizEngine, state::SelectionStore};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QuizEngine>,
    pub selections: SelectionStore,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(engine: Arc<QuizEngine>, selections: SelectionStore) -> Self {
        Self {
            engine,
            selections,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
