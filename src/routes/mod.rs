//! HTTP route definitions and handlers.
//!
//! The service only answers a welcome message and its own heartbeat.

mod health_routes;
mod index_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Creates the application router with all configured routes.
///
/// CORS is permissive so dashboards on other origins can query the heartbeat.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(index_routes::routes())
        .merge(health_routes::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
