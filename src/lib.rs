//! Library exports for heartbeat-monitor, shared between the binary and tests.

pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod routes;
pub mod startup;
pub mod state;
pub mod targets;
pub mod utils;
