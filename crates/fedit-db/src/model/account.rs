use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub uri: String,
    pub username: String,
    /// `None` for local accounts
    pub domain: Option<String>,
    /// Moderators flagged everything this account posts as sensitive
    pub sensitized: bool,
    pub created_at: Timestamp,
}

impl Account {
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.domain.is_none()
    }
}
