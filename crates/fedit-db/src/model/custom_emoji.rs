use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CustomEmoji {
    pub id: Uuid,
    pub shortcode: String,
    pub domain: Option<String>,
    pub uri: Option<String>,
    pub image_remote_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
