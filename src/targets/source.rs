use std::collections::HashMap;

use figment::providers::Env;

use crate::config::TargetConfig;

/// Index-addressed lookup of target urls and names. Indices start at 1.
pub trait TargetSource {
    fn url(&self, index: usize) -> Option<String>;
    fn name(&self, index: usize) -> Option<String>;
}

/// The `targets` list of the config file: entry k is index k.
impl TargetSource for [TargetConfig] {
    fn url(&self, index: usize) -> Option<String> {
        index
            .checked_sub(1)
            .and_then(|i| self.get(i))
            .and_then(|t| t.url.clone())
    }

    fn name(&self, index: usize) -> Option<String> {
        index
            .checked_sub(1)
            .and_then(|i| self.get(i))
            .and_then(|t| t.name.clone())
    }
}

/// `WEBSITE_URL<i>` / `WEBSITE_NAME<i>` variables.
#[derive(Debug, Clone, Default)]
pub struct EnvTargets {
    vars: HashMap<String, String>,
}

impl EnvTargets {
    pub const URL_PREFIX: &'static str = "WEBSITE_URL";
    pub const NAME_PREFIX: &'static str = "WEBSITE_NAME";

    /// Snapshot of the `WEBSITE_*` variables of the process environment.
    ///
    /// Variables that are not valid unicode elsewhere in the environment are tolerated.
    pub fn from_process() -> Self {
        Self::from_vars(
            Env::raw()
                .filter(|key| key.starts_with("WEBSITE_"))
                .iter()
                .map(|(key, value)| (key.as_str().to_ascii_uppercase(), value)),
        )
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TargetSource for EnvTargets {
    fn url(&self, index: usize) -> Option<String> {
        self.vars
            .get(&format!("{}{}", Self::URL_PREFIX, index))
            .cloned()
    }

    fn name(&self, index: usize) -> Option<String> {
        self.vars
            .get(&format!("{}{}", Self::NAME_PREFIX, index))
            .cloned()
    }
}
