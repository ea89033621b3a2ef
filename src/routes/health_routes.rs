//! Health check endpoints.

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/heart-beat", get(heart_beat))
}

/// Always 200; the status tells whether the background poller is alive.
async fn heart_beat(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.poller.is_running() {
        "running"
    } else {
        "stopped"
    };
    Json(json!({ "status": status }))
}
