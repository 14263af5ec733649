use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// (Re-)download the payload and thumbnail of a remote attachment
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FetchMediaAttachment {
    pub media_attachment_id: Uuid,
}
