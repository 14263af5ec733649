use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Hard upper bound on the attachments of a single status
pub const MAX_ATTACHMENTS: usize = 5;

const fn default_max_attachments() -> usize {
    MAX_ATTACHMENTS
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Attachments past this count are ignored. At most [`MAX_ATTACHMENTS`].
    #[serde(default = "default_max_attachments")]
    pub max_attachments: usize,

    /// Glob patterns of origins whose media we never download
    #[serde(default)]
    pub reject_domains: Vec<SmolStr>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_attachments: default_max_attachments(),
            reject_domains: Vec::new(),
        }
    }
}
