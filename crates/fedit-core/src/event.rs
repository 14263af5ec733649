//!
//! Status events over a Tokio broadcast channel
//!

use crate::traits::Broadcaster;
use async_trait::async_trait;
use fedit_error::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

const BROADCAST_CAPACITY: usize = 50;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEventType {
    Update,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StatusEvent {
    pub r#type: StatusEventType,
    pub status_id: Uuid,
}

/// Broadcaster implementation for in-process subscribers
pub struct StatusEventEmitter {
    sender: broadcast::Sender<StatusEvent>,
}

impl StatusEventEmitter {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.sender.subscribe()
    }
}

impl Default for StatusEventEmitter {
    fn default() -> Self {
        Self::new(BROADCAST_CAPACITY)
    }
}

#[async_trait]
impl Broadcaster for StatusEventEmitter {
    async fn broadcast_update(&self, status_id: Uuid) -> Result<()> {
        let event = StatusEvent {
            r#type: StatusEventType::Update,
            status_id,
        };

        // Without any subscribers, this event would be lost anyway
        if self.sender.send(event).is_err() {
            debug!(%status_id, "no subscribers for status event");
        }

        Ok(())
    }
}
