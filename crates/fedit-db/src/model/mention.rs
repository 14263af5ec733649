use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Mention {
    pub id: Uuid,
    pub status_id: Uuid,
    pub account_id: Uuid,
    /// Silent mentions stay attached but never notify
    pub silent: bool,
    pub created_at: Timestamp,
}
