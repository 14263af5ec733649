use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::time::Duration;

const fn default_lease_secs() -> u64 {
    15 * 60
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RedisConfiguration {
    pub url: SmolStr,
    #[serde(default = "default_lease_secs")]
    pub lease_secs: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InMemoryConfiguration {
    #[serde(default = "default_lease_secs")]
    pub lease_secs: u64,
}

/// Backend of the per-resource lease lock
///
/// The in-memory backend only excludes workers living in the same process
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Configuration {
    Redis(RedisConfiguration),
    InMemory(InMemoryConfiguration),
}

impl Configuration {
    /// Upper bound on how long a crashed holder can block a resource
    #[must_use]
    pub fn lease(&self) -> Duration {
        let secs = match self {
            Self::Redis(config) => config.lease_secs,
            Self::InMemory(config) => config.lease_secs,
        };

        Duration::from_secs(secs)
    }
}
