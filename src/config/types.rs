use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::monitor::{MonitorConfig, TargetConfig};
use crate::error::StartupError;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "MONITOR_CONFIG";
/// Config file used when `MONITOR_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
/// Prefix of environment overrides, e.g. `MONITOR_MONITOR__INTERVAL_SECS=10`.
pub const ENV_PREFIX: &str = "MONITOR_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Ordered targets. When empty, targets are read from `WEBSITE_URL<i>` variables.
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

fn default_bind_address() -> String {
    "0.0.0.0:5000".to_string()
}

/// Builds the layered figment: defaults, then the YAML file, then `MONITOR_*` variables.
pub fn config_figment(path: impl AsRef<Path>) -> Figment {
    Figment::from(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
}

/// Extracts the current config version from a figment.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from `$MONITOR_CONFIG`, falling back to "config.yaml" in the current directory.
pub fn load_config() -> Result<ConfigV1, StartupError> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = extract_config(&config_figment(path))?;
    config.monitor.validate()?;
    Ok(config)
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
