use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable snapshot of a status at one point of its history
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StatusEdit {
    pub id: Uuid,
    pub status_id: Uuid,
    pub account_id: Uuid,
    pub text: String,
    pub spoiler_text: String,
    pub sensitive: bool,
    pub media_attachments_changed: bool,
    pub ordered_media_attachment_ids: Vec<Uuid>,
    pub media_descriptions: Vec<Option<String>>,
    pub poll_options: Option<Vec<String>>,
    pub created_at: Timestamp,
}
