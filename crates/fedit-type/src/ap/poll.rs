use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Replies {
    #[serde(default)]
    pub total_items: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub replies: Option<Replies>,
}

impl PollOption {
    #[must_use]
    pub fn votes(&self) -> u64 {
        self.replies
            .as_ref()
            .and_then(|replies| replies.total_items)
            .unwrap_or(0)
    }
}

/// The `closed` property of a question
///
/// Implementations either send the closing time or just a flag
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Closed {
    Flag(bool),
    Timestamp(String),
}
