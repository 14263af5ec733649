use serde::{Deserialize, Serialize};
use std::{ops::RangeInclusive, time::Duration};

const fn default_account_fetch_timeout_secs() -> u64 {
    10
}

const fn default_link_preview_delay_min_secs() -> u64 {
    1
}

const fn default_link_preview_delay_max_secs() -> u64 {
    59
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    #[serde(default = "default_account_fetch_timeout_secs")]
    pub account_fetch_timeout_secs: u64,
    #[serde(default = "default_link_preview_delay_min_secs")]
    pub link_preview_delay_min_secs: u64,
    #[serde(default = "default_link_preview_delay_max_secs")]
    pub link_preview_delay_max_secs: u64,
}

impl Configuration {
    #[must_use]
    pub fn account_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.account_fetch_timeout_secs)
    }

    /// Range (in seconds) the link preview refresh delay is drawn from
    #[must_use]
    pub fn link_preview_delay_range(&self) -> RangeInclusive<u64> {
        let min = self.link_preview_delay_min_secs;
        min..=self.link_preview_delay_max_secs.max(min)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            account_fetch_timeout_secs: default_account_fetch_timeout_secs(),
            link_preview_delay_min_secs: default_link_preview_delay_min_secs(),
            link_preview_delay_max_secs: default_link_preview_delay_max_secs(),
        }
    }
}
