use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::StartupError;

/// Timing and path settings of the heartbeat poller.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct MonitorConfig {
    /// Seconds slept after a cycle completes.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Path appended to every configured target URL.
    #[serde(default = "default_heartbeat_path")]
    pub heartbeat_path: String,
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A zero timeout would fail every poll.
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.timeout_secs == 0 {
            return Err(StartupError::InvalidMonitorSetting {
                field: "timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
            heartbeat_path: default_heartbeat_path(),
        }
    }
}

fn default_interval_secs() -> u64 {
    30
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_heartbeat_path() -> String {
    "/api/heart-beat".to_string()
}

/// One entry of the ordered `targets` list. Entry k of the list is target index k.
/// An entry without a url is a gap and ends the list.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct TargetConfig {
    pub name: Option<String>,
    pub url: Option<String>,
}
