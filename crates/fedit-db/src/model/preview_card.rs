use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Cached link preview of the first link in a status
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PreviewCard {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub fetched_at: Timestamp,
}
