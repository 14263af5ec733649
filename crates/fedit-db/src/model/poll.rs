use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Poll {
    pub id: Uuid,
    pub account_id: Uuid,
    pub status_id: Uuid,
    /// Option labels. Never changed after creation, tallies are positional.
    pub options: Vec<String>,
    pub multiple: bool,
    pub expires_at: Option<Timestamp>,
    pub voters_count: Option<u64>,
    pub cached_tallies: Vec<u64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Poll {
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
