//! Fatal errors raised while bringing the service up.

use thiserror::Error;

/// Anything that stops the service from becoming ready.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("invalid logging.level '{0}'. Valid values: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("invalid monitor.{field}: {reason}")]
    InvalidMonitorSetting { field: &'static str, reason: String },

    #[error("no monitoring targets configured (expected targets[0].url or WEBSITE_URL1)")]
    NoTargets,

    #[error("invalid url for target {index} '{url}': {reason}")]
    InvalidTargetUrl {
        index: usize,
        url: String,
        reason: String,
    },

    #[error("could not bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
