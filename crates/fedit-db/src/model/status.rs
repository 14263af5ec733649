use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Status {
    pub id: Uuid,
    pub uri: String,
    pub account_id: Uuid,
    pub text: String,
    pub spoiler_text: String,
    pub sensitive: bool,
    pub language: Option<String>,
    pub tag_ids: Vec<Uuid>,
    pub ordered_media_attachment_ids: Vec<Uuid>,
    pub poll_id: Option<Uuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub edited_at: Option<Timestamp>,
}

impl Status {
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }
}
