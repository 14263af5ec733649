#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(forbidden_lint_groups)]

use fedit_config::media;
use fedit_core::traits::MediaPolicy;
use fedit_error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::sync::Arc;

/// Origins whose media we refuse to store or download
#[derive(Clone)]
pub struct MediaRejectFilter {
    domains: Arc<GlobSet>,
}

impl MediaRejectFilter {
    pub fn new(config: &media::Configuration) -> Result<Self> {
        let mut globset = GlobSetBuilder::new();
        for glob in &config.reject_domains {
            globset.add(Glob::new(&glob.to_lowercase())?);
        }
        let domains = Arc::new(globset.build()?);

        Ok(Self { domains })
    }
}

impl MediaPolicy for MediaRejectFilter {
    fn is_media_rejected(&self, domain: &str) -> bool {
        self.domains.is_match(domain.to_lowercase())
    }
}
