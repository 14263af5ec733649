use async_trait::async_trait;
use fedit_error::Result;
use uuid::Uuid;

#[async_trait]
pub trait Broadcaster: Send + Sync + 'static {
    /// Tell subscribers the status changed
    async fn broadcast_update(&self, status_id: Uuid) -> Result<()>;
}
