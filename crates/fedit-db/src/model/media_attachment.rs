use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaState {
    Pending,
    Downloaded,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MediaAttachment {
    pub id: Uuid,
    pub account_id: Uuid,
    /// Cleared when the attachment is dropped from its status
    pub status_id: Option<Uuid>,
    pub remote_url: String,
    pub thumbnail_remote_url: Option<String>,
    pub description: Option<String>,
    pub focus: Option<(f64, f64)>,
    pub blurhash: Option<String>,
    pub content_type: String,
    pub state: MediaState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaAttachment {
    /// Whether we know how to process the payload of this attachment
    #[must_use]
    pub fn is_downloadable(&self) -> bool {
        ["image/", "video/", "audio/"]
            .iter()
            .any(|prefix| self.content_type.starts_with(prefix))
    }
}
