//! Append-only edit history
//!
//! A status edited for the first time gets an entry for its original state
//! before the entry of the edit itself.

use fedit_db::{
    model::{status::Status, status_edit::StatusEdit},
    Transaction,
};
use fedit_error::Result;
use iso8601_timestamp::Timestamp;
use uuid::Uuid;

async fn snapshot(
    tx: &mut dyn Transaction,
    status: &Status,
    media_attachments_changed: bool,
    created_at: Timestamp,
) -> Result<StatusEdit> {
    let attachments = tx.media_attachments_for_status(status.id).await?;
    let media_descriptions = status
        .ordered_media_attachment_ids
        .iter()
        .filter_map(|id| attachments.iter().find(|attachment| attachment.id == *id))
        .map(|attachment| attachment.description.clone())
        .collect();

    let poll_options = match status.poll_id {
        Some(poll_id) => tx.find_poll(poll_id).await?.map(|poll| poll.options),
        None => None,
    };

    Ok(StatusEdit {
        id: Uuid::now_v7(),
        status_id: status.id,
        account_id: status.account_id,
        text: status.text.clone(),
        spoiler_text: status.spoiler_text.clone(),
        sensitive: status.sensitive,
        media_attachments_changed,
        ordered_media_attachment_ids: status.ordered_media_attachment_ids.clone(),
        media_descriptions,
        poll_options,
        created_at,
    })
}

/// Record the state of a never edited status, dated at its creation
///
/// Does nothing once the status has any history
pub async fn record_original(tx: &mut dyn Transaction, status: &Status) -> Result<bool> {
    if tx.count_status_edits(status.id).await? > 0 {
        return Ok(false);
    }

    let edit = snapshot(tx, status, false, status.created_at).await?;
    tx.insert_status_edit(&edit).await?;

    Ok(true)
}

/// Record the state of the status after an applied edit
pub async fn record_edit(
    tx: &mut dyn Transaction,
    status: &Status,
    media_attachments_changed: bool,
    edited_at: Timestamp,
) -> Result<StatusEdit> {
    let edit = snapshot(tx, status, media_attachments_changed, edited_at).await?;
    tx.insert_status_edit(&edit).await?;

    Ok(edit)
}
