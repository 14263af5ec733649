use crate::{
    effects::PostCommit,
    history,
    parser::{self, timestamp},
    reconcile::{
        media::{self, MediaContext},
        metadata::{self, AccountLookup},
        poll,
    },
    settings::Settings,
};
use fedit_cache::ArcCache;
use fedit_core::traits::{AccountResolver, Broadcaster, Clock, Fetcher, Locker, MediaPolicy};
use fedit_db::{
    model::{preview_card::PreviewCard, status::Status},
    with_transaction, Store, Transaction,
};
use fedit_error::{bail, ErrorType, Result};
use fedit_jobs::JobService;
use fedit_type::ap::{Object, ObjectKind};
use iso8601_timestamp::Timestamp;
use scoped_futures::ScopedFutureExt;
use std::sync::Arc;
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// The document is neither a note nor a question
    UnsupportedType,
    /// The stored status carries a newer edit than the document
    Stale,
    /// This revision was merged before and there was nothing to refresh
    AlreadyApplied,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppliedUpdate {
    pub status: Status,
    pub media_changed: bool,
    pub text_changed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UpdateOutcome {
    Applied(AppliedUpdate),
    /// Same revision delivered again, only the poll tallies were refreshed
    PollRefreshed,
    Skipped(SkipReason),
}

/// How the document relates to what we have stored
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Revision {
    Older,
    Same,
    Newer,
}

impl Revision {
    /// Malformed or missing timestamps never count as older
    fn of(edited_at: Option<Timestamp>, declared: Option<Timestamp>) -> Self {
        match (edited_at, declared) {
            (Some(edited_at), Some(declared)) if edited_at > declared => Self::Older,
            (Some(edited_at), Some(declared)) if edited_at == declared => Self::Same,
            _ => Self::Newer,
        }
    }
}

/// Key of the lease taken while a status is updated
#[must_use]
pub fn lock_key(uri: &str) -> String {
    format!("create:{uri}")
}

#[derive(Clone, TypedBuilder)]
pub struct StatusUpdateService {
    store: Arc<dyn Store>,
    locker: Arc<dyn Locker>,
    clock: Arc<dyn Clock>,
    account_resolver: Arc<dyn AccountResolver>,
    fetcher: Arc<dyn Fetcher>,
    media_policy: Arc<dyn MediaPolicy>,
    pub(crate) job_service: JobService,
    pub(crate) broadcaster: Arc<dyn Broadcaster>,
    pub(crate) link_preview_cache: ArcCache<Uuid, PreviewCard>,
    #[builder(default)]
    pub(crate) settings: Settings,
}

impl StatusUpdateService {
    /// Merge the updated remote document into the stored status
    ///
    /// Fails with [`ErrorType::BadRequest`] if the document id is not the URI
    /// of the status, and with [`ErrorType::RaceCondition`] if another update
    /// of the same status is in flight. The caller is expected to retry later.
    #[instrument(skip_all, fields(status_id = %status.id, uri = %status.uri))]
    pub async fn apply(&self, status: &Status, object: &Object) -> Result<UpdateOutcome> {
        if object.kind() == ObjectKind::Unsupported {
            debug!(types = ?object.r#type, "unsupported object type");
            return Ok(UpdateOutcome::Skipped(SkipReason::UnsupportedType));
        }

        if object.id != status.uri {
            debug!(id = %object.id, "document id does not match the status");
            bail!(
                type = ErrorType::BadRequest(Some("document id does not match the status".into())),
                "document does not belong to the status"
            );
        }

        let declared = timestamp::parse("updated", object.updated.as_deref());
        if Revision::of(status.edited_at, declared) == Revision::Older {
            debug!("stored status is newer than the document");
            return Ok(UpdateOutcome::Skipped(SkipReason::Stale));
        }

        let Some(token) = self
            .locker
            .try_acquire(&lock_key(&object.id), self.settings.lease)
            .await?
        else {
            bail!(
                type = ErrorType::RaceCondition,
                "status is being updated by another worker"
            );
        };

        let result = self.merge(status.id, object, declared).await;

        if let Err(error) = self.locker.release(token).await {
            warn!(?error, "failed to release lock, the lease will run out on its own");
        }

        let (outcome, effects) = result?;
        self.run_effects(effects).await;

        Ok(outcome)
    }

    async fn merge(
        &self,
        status_id: Uuid,
        object: &Object,
        declared: Option<Timestamp>,
    ) -> Result<(UpdateOutcome, PostCommit)> {
        with_transaction(self.store.as_ref(), |tx| {
            async move {
                // Another worker might have won the race before us
                let Some(status) = tx.find_status(status_id).await? else {
                    bail!(type = ErrorType::NotFound, "status not found");
                };

                match Revision::of(status.edited_at, declared) {
                    Revision::Older => {
                        debug!("stored status became newer while waiting");
                        Ok((
                            UpdateOutcome::Skipped(SkipReason::Stale),
                            PostCommit::default(),
                        ))
                    }
                    Revision::Same => self.refresh_poll(tx, &status, object).await,
                    Revision::Newer => self.apply_edit(tx, status, object, declared).await,
                }
            }
            .scope_boxed()
        })
        .await
    }

    /// Handle a redelivered revision
    async fn refresh_poll(
        &self,
        tx: &mut dyn Transaction,
        status: &Status,
        object: &Object,
    ) -> Result<(UpdateOutcome, PostCommit)> {
        let now = self.clock.now();
        let shape = parser::poll_shape(object, now);

        let Some(refreshed) = poll::refresh(tx, status, shape, now).await? else {
            debug!("revision already applied");
            return Ok((
                UpdateOutcome::Skipped(SkipReason::AlreadyApplied),
                PostCommit::default(),
            ));
        };

        let effects = PostCommit {
            poll_expiry: refreshed.poll_id.zip(refreshed.new_expiry),
            ..PostCommit::default()
        };

        Ok((UpdateOutcome::PollRefreshed, effects))
    }

    async fn apply_edit(
        &self,
        tx: &mut dyn Transaction,
        mut status: Status,
        object: &Object,
        declared: Option<Timestamp>,
    ) -> Result<(UpdateOutcome, PostCommit)> {
        let now = self.clock.now();
        let edited_at = declared.unwrap_or(now);

        let Some(account) = tx.find_account(status.account_id).await? else {
            bail!(type = ErrorType::NotFound, "author of the status not found");
        };
        let rejected = account
            .domain
            .as_deref()
            .is_some_and(|domain| self.media_policy.is_media_rejected(domain));

        history::record_original(tx, &status).await?;

        let descriptors = parser::media_descriptors(object, self.settings.max_attachments);
        let media = media::reconcile(
            tx,
            MediaContext {
                status: &status,
                rejected,
                now,
            },
            &descriptors,
        )
        .await?;
        status
            .ordered_media_attachment_ids
            .clone_from(&media.attachment_ids);

        let poll = poll::reconcile(tx, &status, parser::poll_shape(object, now), now).await?;
        status.poll_id = poll.poll_id;

        let media_changed = media.changed || poll.changed;

        let text = parser::text(object);
        let spoiler_text = parser::spoiler_text(object);
        let text_changed = status.text != text || status.spoiler_text != spoiler_text;

        status.text = text;
        status.spoiler_text = spoiler_text;
        status.sensitive = parser::sensitive(object) || account.sensitized;
        status.language = parser::language(object).or(status.language.take());
        status.edited_at = Some(
            status
                .edited_at
                .map_or(edited_at, |previous| previous.max(edited_at)),
        );
        status.updated_at = now;
        tx.update_status(&status).await?;

        let buckets = parser::tag_buckets(object);
        metadata::reconcile_tags(tx, &mut status, &buckets.hashtags).await?;

        let lookup = AccountLookup {
            resolver: self.account_resolver.as_ref(),
            fetcher: self.fetcher.as_ref(),
            fetch_timeout: self.settings.account_fetch_timeout,
        };
        metadata::reconcile_mentions(tx, &status, &buckets.mentions, &lookup, now).await?;

        let custom_emoji_ids =
            metadata::reconcile_emojis(tx, &account, &buckets.emojis, rejected, now).await?;

        history::record_edit(tx, &status, media_changed, edited_at).await?;

        info!(media_changed, text_changed, "applied update");

        let effects = PostCommit {
            media_attachment_ids: media.to_download,
            custom_emoji_ids,
            poll_expiry: poll.poll_id.zip(poll.new_expiry),
            refresh_link_preview: text_changed.then_some(status.id),
            broadcast: Some(status.id),
        };

        Ok((
            UpdateOutcome::Applied(AppliedUpdate {
                status,
                media_changed,
                text_changed,
            }),
            effects,
        ))
    }
}
