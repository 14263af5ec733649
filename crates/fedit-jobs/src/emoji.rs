use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Download the image of a created or updated custom emoji
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FetchCustomEmoji {
    pub custom_emoji_id: Uuid,
}
