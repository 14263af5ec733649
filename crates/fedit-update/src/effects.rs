//! Side effects of an update that run after the commit
//!
//! They are best-effort. A failure is logged and never unwinds the merge.

use crate::service::StatusUpdateService;
use fedit_cache::CacheBackend;
use fedit_jobs::{
    emoji::FetchCustomEmoji, link_preview::RefreshLinkPreview, media::FetchMediaAttachment,
    poll::NotifyPollExpiry, Enqueue, Job, Schedule,
};
use iso8601_timestamp::Timestamp;
use rand::Rng;
use std::{ops::RangeInclusive, time::Duration};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct PostCommit {
    pub media_attachment_ids: Vec<Uuid>,
    pub custom_emoji_ids: Vec<Uuid>,
    pub poll_expiry: Option<(Uuid, Timestamp)>,
    /// Status whose link preview is stale
    pub refresh_link_preview: Option<Uuid>,
    /// Status subscribers have to hear about
    pub broadcast: Option<Uuid>,
}

fn random_delay(range: &RangeInclusive<u64>) -> Duration {
    let secs = if range.is_empty() {
        *range.start()
    } else {
        rand::thread_rng().gen_range(range.clone())
    };

    Duration::from_secs(secs)
}

impl StatusUpdateService {
    async fn schedule<T>(&self, job: T, schedule: Schedule)
    where
        Job: From<T>,
    {
        let enqueue = Enqueue::builder().job(job).schedule(schedule).build();
        if let Err(error) = self.job_service.enqueue(enqueue).await {
            warn!(?error, "failed to schedule job");
        }
    }

    #[instrument(skip_all)]
    pub(crate) async fn run_effects(&self, effects: PostCommit) {
        for media_attachment_id in effects.media_attachment_ids {
            self.schedule(FetchMediaAttachment { media_attachment_id }, Schedule::Now)
                .await;
        }

        for custom_emoji_id in effects.custom_emoji_ids {
            self.schedule(FetchCustomEmoji { custom_emoji_id }, Schedule::Now)
                .await;
        }

        if let Some((poll_id, expires_at)) = effects.poll_expiry {
            self.schedule(NotifyPollExpiry { poll_id }, Schedule::At(expires_at))
                .await;
        }

        if let Some(status_id) = effects.refresh_link_preview {
            if let Err(error) = self.link_preview_cache.invalidate(&status_id).await {
                warn!(?error, %status_id, "failed to drop cached link preview");
            }

            let delay = random_delay(&self.settings.link_preview_delay);
            self.schedule(RefreshLinkPreview { status_id }, Schedule::In(delay))
                .await;
        }

        if let Some(status_id) = effects.broadcast {
            if let Err(error) = self.broadcaster.broadcast_update(status_id).await {
                warn!(?error, %status_id, "failed to broadcast update");
            }
        }
    }
}
