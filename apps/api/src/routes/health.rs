use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Liveness probe.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "AI Resume Analyzer API running"
    }))
}

/// GET /health
/// Returns a status object with service version and the active feedback backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "feedback_mode": state.config.feedback_mode.to_string()
    }))
}
