//! Application startup and server initialization.
//!
//! Loads the target list, starts the heartbeat poller once and serves the
//! HTTP routes until a shutdown signal arrives.

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ConfigV1;
use crate::error::StartupError;
use crate::models::TargetList;
use crate::poller::{HeartbeatPoller, PollerController};
use crate::routes;
use crate::state::AppState;
use crate::targets::{load_targets, EnvTargets};

/// Loads targets from the config file, or from `WEBSITE_URL<i>` variables when it lists none.
pub fn load_target_list(config: &ConfigV1) -> Result<TargetList, StartupError> {
    let heartbeat_path = &config.monitor.heartbeat_path;
    if config.targets.is_empty() {
        info!("No targets in configuration, reading WEBSITE_URL<i> environment variables");
        load_targets(&EnvTargets::from_process(), heartbeat_path)
    } else {
        load_targets(config.targets.as_slice(), heartbeat_path)
    }
}

/// Initializes and runs the application server until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if no valid target is configured, if the server fails to
/// bind to the configured address, or if serving fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), StartupError> {
    run_until(config, shutdown_signal()).await
}

/// Like [`run`], stopping when `shutdown` completes.
pub async fn run_until<F>(config: Arc<ConfigV1>, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let targets = load_target_list(&config)?;

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })?;

    let poller = Arc::new(PollerController::new());
    poller.start(HeartbeatPoller::new(targets, &config.monitor));

    let state = AppState {
        poller: poller.clone(),
    };
    let app = routes::create_router(state);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve);

    poller.shutdown().await;
    info!("Server stopped");
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
