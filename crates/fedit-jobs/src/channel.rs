//!
//! Job queue handing the jobs to an in-process consumer
//!

use crate::{JobDetails, JobQueue};
use async_trait::async_trait;
use fedit_error::Result;
use tokio::sync::mpsc;

pub struct ChannelJobQueue {
    sender: mpsc::UnboundedSender<JobDetails>,
}

impl ChannelJobQueue {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<JobDetails>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl JobQueue for ChannelJobQueue {
    async fn enqueue(&self, details: JobDetails) -> Result<()> {
        self.sender.send(details)?;
        Ok(())
    }
}
