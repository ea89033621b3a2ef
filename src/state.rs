//! Shared application state.

use crate::poller::PollerController;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Controller of the background heartbeat poller.
    pub poller: Arc<PollerController>,
}
