use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tell the voters the poll has closed
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NotifyPollExpiry {
    pub poll_id: Uuid,
}
