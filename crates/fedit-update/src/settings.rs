use fedit_config::{media::MAX_ATTACHMENTS, Configuration};
use std::{ops::RangeInclusive, time::Duration};

/// Tunables of the update pipeline
#[derive(Clone, Debug)]
pub struct Settings {
    /// How long the lock on a status is held at most
    pub lease: Duration,
    /// Attachments past this count are ignored, never more than [`MAX_ATTACHMENTS`]
    pub max_attachments: usize,
    /// Upper bound for fetching a mentioned account
    pub account_fetch_timeout: Duration,
    /// Seconds to wait before regenerating the link preview
    pub link_preview_delay: RangeInclusive<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lease: Duration::from_secs(15 * 60),
            max_attachments: MAX_ATTACHMENTS,
            account_fetch_timeout: Duration::from_secs(10),
            link_preview_delay: 1..=59,
        }
    }
}

impl From<&Configuration> for Settings {
    fn from(config: &Configuration) -> Self {
        Self {
            lease: config.lock.lease(),
            max_attachments: config.media.max_attachments,
            account_fetch_timeout: config.update.account_fetch_timeout(),
            link_preview_delay: config.update.link_preview_delay_range(),
        }
    }
}
