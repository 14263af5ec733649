use crate::parser::PollShape;
use fedit_db::{
    model::{poll::Poll, status::Status},
    Transaction,
};
use fedit_error::Result;
use iso8601_timestamp::Timestamp;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct PollOutcome {
    pub poll_id: Option<Uuid>,
    /// The poll was replaced, attached or removed
    pub changed: bool,
    /// Expiry of the poll after the merge, if it moved
    pub new_expiry: Option<Timestamp>,
}

fn refresh_in_place(poll: &mut Poll, shape: PollShape, now: Timestamp) -> bool {
    let expiry_moved = poll.expires_at != shape.expires_at;

    poll.multiple = shape.multiple;
    poll.expires_at = shape.expires_at;
    poll.voters_count = shape.voters_count;
    poll.cached_tallies = shape.tallies;
    poll.updated_at = now;

    expiry_moved
}

async fn current_poll(tx: &mut dyn Transaction, status: &Status) -> Result<Option<Poll>> {
    match status.poll_id {
        Some(poll_id) => tx.find_poll(poll_id).await,
        None => Ok(None),
    }
}

/// Merge the poll of the document into the status
///
/// A poll is only reused if its option labels are exactly the same, since
/// tallies refer to options by position. Anything else replaces it.
#[instrument(skip_all, fields(status_id = %status.id))]
pub async fn reconcile(
    tx: &mut dyn Transaction,
    status: &Status,
    shape: Option<PollShape>,
    now: Timestamp,
) -> Result<PollOutcome> {
    let existing = current_poll(tx, status).await?;

    let outcome = match (existing, shape) {
        (Some(mut poll), Some(shape)) if poll.options == shape.options => {
            let expiry_moved = refresh_in_place(&mut poll, shape, now);
            tx.save_poll(&poll).await?;

            PollOutcome {
                poll_id: Some(poll.id),
                changed: false,
                new_expiry: poll.expires_at.filter(|_| expiry_moved),
            }
        }
        (existing, Some(shape)) => {
            if let Some(previous) = existing {
                debug!(poll_id = %previous.id, "options changed, replacing poll");
                tx.delete_poll(previous.id).await?;
            }

            let poll = Poll {
                id: Uuid::now_v7(),
                account_id: status.account_id,
                status_id: status.id,
                options: shape.options,
                multiple: shape.multiple,
                expires_at: shape.expires_at,
                voters_count: shape.voters_count,
                cached_tallies: shape.tallies,
                created_at: now,
                updated_at: now,
            };
            tx.save_poll(&poll).await?;

            PollOutcome {
                poll_id: Some(poll.id),
                changed: true,
                new_expiry: poll.expires_at,
            }
        }
        (Some(previous), None) => {
            debug!(poll_id = %previous.id, "document dropped the poll");
            tx.delete_poll(previous.id).await?;

            PollOutcome {
                poll_id: None,
                changed: true,
                new_expiry: None,
            }
        }
        (None, None) => PollOutcome::default(),
    };

    Ok(outcome)
}

/// Refresh tallies, voters count and expiry of an unchanged poll
///
/// Returns `None` if there is nothing to refresh (no poll, or its options differ)
#[instrument(skip_all, fields(status_id = %status.id))]
pub async fn refresh(
    tx: &mut dyn Transaction,
    status: &Status,
    shape: Option<PollShape>,
    now: Timestamp,
) -> Result<Option<PollOutcome>> {
    let (Some(mut poll), Some(shape)) = (current_poll(tx, status).await?, shape) else {
        return Ok(None);
    };

    if poll.options != shape.options {
        debug!(poll_id = %poll.id, "options differ, not touching the poll");
        return Ok(None);
    }

    let expiry_moved = refresh_in_place(&mut poll, shape, now);
    tx.save_poll(&poll).await?;

    Ok(Some(PollOutcome {
        poll_id: Some(poll.id),
        changed: false,
        new_expiry: poll.expires_at.filter(|_| expiry_moved),
    }))
}
