use crate::parser::{media::normalize_url, MediaDescriptor};
use fedit_db::{
    model::{
        media_attachment::{MediaAttachment, MediaState},
        status::Status,
    },
    Transaction,
};
use fedit_error::Result;
use iso8601_timestamp::Timestamp;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MediaOutcome {
    /// Attachments of the status after the merge, in document order
    pub attachment_ids: Vec<Uuid>,
    /// The set, the order or a significant property of the attachments changed
    pub changed: bool,
    /// Attachments whose payload has to be (re-)downloaded
    pub to_download: Vec<Uuid>,
}

pub struct MediaContext<'a> {
    pub status: &'a Status,
    /// Media of the origin is rejected, nothing gets downloaded
    pub rejected: bool,
    pub now: Timestamp,
}

fn comparison_key(url: &str) -> String {
    normalize_url(url).map_or_else(|| url.to_owned(), String::from)
}

/// Current attachments in the order the status lists them
fn ordered(status: &Status, mut attachments: Vec<MediaAttachment>) -> Vec<MediaAttachment> {
    attachments.sort_by_key(|attachment| {
        status
            .ordered_media_attachment_ids
            .iter()
            .position(|id| *id == attachment.id)
            .unwrap_or(usize::MAX)
    });
    attachments
}

#[instrument(skip_all, fields(status_id = %ctx.status.id))]
pub async fn reconcile(
    tx: &mut dyn Transaction,
    ctx: MediaContext<'_>,
    descriptors: &[MediaDescriptor],
) -> Result<MediaOutcome> {
    let status = ctx.status;
    let previous = ordered(status, tx.media_attachments_for_status(status.id).await?);
    let previous_ids: Vec<Uuid> = previous.iter().map(|attachment| attachment.id).collect();

    let mut outcome = MediaOutcome::default();
    let mut significant = false;

    for descriptor in descriptors {
        let existing = previous
            .iter()
            .find(|attachment| comparison_key(&attachment.remote_url) == descriptor.remote_url);

        let (mut attachment, is_new) = match existing {
            Some(attachment) => (attachment.clone(), false),
            None => (
                MediaAttachment {
                    id: Uuid::now_v7(),
                    account_id: status.account_id,
                    status_id: None,
                    remote_url: descriptor.remote_url.clone(),
                    thumbnail_remote_url: None,
                    description: None,
                    focus: None,
                    blurhash: None,
                    content_type: descriptor.content_type.clone(),
                    state: MediaState::Pending,
                    created_at: ctx.now,
                    updated_at: ctx.now,
                },
                true,
            ),
        };

        let remote_changed = attachment.remote_url != descriptor.remote_url;
        let thumbnail_changed = attachment.thumbnail_remote_url != descriptor.thumbnail_remote_url;
        let description_changed = attachment.description != descriptor.description;

        if !is_new && (remote_changed || thumbnail_changed || description_changed) {
            significant = true;
        }

        attachment.remote_url.clone_from(&descriptor.remote_url);
        attachment
            .thumbnail_remote_url
            .clone_from(&descriptor.thumbnail_remote_url);
        attachment.description.clone_from(&descriptor.description);
        attachment.focus = descriptor.focus;
        attachment.blurhash.clone_from(&descriptor.blurhash);
        attachment.content_type.clone_from(&descriptor.content_type);
        attachment.updated_at = ctx.now;

        tx.save_media_attachment(&attachment).await?;

        let needs_download = is_new || remote_changed || thumbnail_changed;
        if needs_download && !ctx.rejected && attachment.is_downloadable() {
            outcome.to_download.push(attachment.id);
        }

        outcome.attachment_ids.push(attachment.id);
    }

    let removed: Vec<Uuid> = previous_ids
        .iter()
        .filter(|id| !outcome.attachment_ids.contains(id))
        .copied()
        .collect();
    let added: Vec<Uuid> = outcome
        .attachment_ids
        .iter()
        .filter(|id| !previous_ids.contains(id))
        .copied()
        .collect();

    if !removed.is_empty() {
        debug!(?removed, "unlinking attachments");
        tx.set_media_attachments_status(&removed, None).await?;
    }
    if !added.is_empty() {
        tx.set_media_attachments_status(&added, Some(status.id))
            .await?;
    }

    outcome.changed = significant || outcome.attachment_ids != previous_ids;

    Ok(outcome)
}
