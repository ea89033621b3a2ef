#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use figment::providers::{Format, Yaml};
use figment::Figment;
use heartbeat_monitor::config::{extract_config, ConfigV1};
use heartbeat_monitor::poller::PollerController;
use heartbeat_monitor::routes::create_router;
use heartbeat_monitor::state::AppState;

pub fn config_from_yaml(yaml: &str) -> ConfigV1 {
    extract_config(&Figment::new().merge(Yaml::string(yaml))).expect("Failed to parse test config YAML")
}

pub fn build_app(poller: Arc<PollerController>) -> Router {
    create_router(AppState { poller })
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
