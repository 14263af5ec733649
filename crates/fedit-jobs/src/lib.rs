#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(forbidden_lint_groups)]

use self::{
    emoji::FetchCustomEmoji, link_preview::RefreshLinkPreview, media::FetchMediaAttachment,
    poll::NotifyPollExpiry,
};
use async_trait::async_trait;
use derive_more::From;
use fedit_error::Result;
use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use typed_builder::TypedBuilder;

pub mod channel;
pub mod emoji;
pub mod link_preview;
pub mod media;
pub mod poll;

/// Work scheduled after an update was committed
#[derive(Clone, Debug, Deserialize, Eq, From, PartialEq, Serialize)]
pub enum Job {
    FetchCustomEmoji(FetchCustomEmoji),
    FetchMediaAttachment(FetchMediaAttachment),
    NotifyPollExpiry(NotifyPollExpiry),
    RefreshLinkPreview(RefreshLinkPreview),
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Schedule {
    Now,
    /// Run once the delay passed
    In(Duration),
    /// Run at the given point in time
    At(Timestamp),
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JobDetails {
    pub job: Job,
    pub schedule: Schedule,
}

#[async_trait]
pub trait JobQueue: Send + Sync + 'static {
    async fn enqueue(&self, details: JobDetails) -> Result<()>;
}

#[derive(TypedBuilder)]
pub struct Enqueue<T> {
    job: T,
    #[builder(default = Schedule::Now)]
    schedule: Schedule,
}

#[derive(Clone, TypedBuilder)]
pub struct JobService {
    job_queue: Arc<dyn JobQueue>,
}

impl JobService {
    pub async fn enqueue<T>(&self, enqueue: Enqueue<T>) -> Result<()>
    where
        Job: From<T>,
    {
        self.job_queue
            .enqueue(JobDetails {
                job: enqueue.job.into(),
                schedule: enqueue.schedule,
            })
            .await
    }
}
