use std::sync::Arc;

use crate::analysis::feedback::FeedbackGenerator;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stub or live backend, chosen from FEEDBACK_MODE.
    pub feedback: Arc<dyn FeedbackGenerator>,
}
