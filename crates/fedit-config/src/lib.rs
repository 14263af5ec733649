#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, forbidden_lint_groups)]

pub mod cache;
pub mod lock;
pub mod media;
pub mod update;

use eyre::ensure;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    pub cache: cache::Configuration,
    pub lock: lock::Configuration,
    #[serde(default)]
    pub media: media::Configuration,
    #[serde(default)]
    pub update: update::Configuration,
}

impl Configuration {
    pub async fn load<P>(path: P) -> eyre::Result<Self>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> eyre::Result<()> {
        ensure!(
            !self.lock.lease().is_zero(),
            "lock.lease-secs has to be greater than zero"
        );
        ensure!(
            (1..=media::MAX_ATTACHMENTS).contains(&self.media.max_attachments),
            "media.max-attachments has to be between 1 and {}",
            media::MAX_ATTACHMENTS
        );

        Ok(())
    }
}
