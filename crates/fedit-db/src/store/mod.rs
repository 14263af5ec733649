//! Storage seam
//!
//! Every mutation goes through an explicit [`Transaction`] handle. Nothing is
//! persisted until [`Transaction::commit`] is called, dropping or rolling back
//! a transaction discards all of its writes.

use crate::model::{
    account::Account, custom_emoji::CustomEmoji, media_attachment::MediaAttachment,
    mention::Mention, poll::Poll, status::Status, status_edit::StatusEdit, tag::Tag,
};
use async_trait::async_trait;
use fedit_error::Result;
use scoped_futures::ScopedBoxFuture;
use uuid::Uuid;

pub mod memory;

/// Operations a store can be told to fail at
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailPoint {
    InsertMention,
    InsertStatusEdit,
    SaveMediaAttachment,
    SavePoll,
    UpdateStatus,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn Transaction>>;
}

#[async_trait]
pub trait Transaction: Send {
    async fn find_account(&mut self, id: Uuid) -> Result<Option<Account>>;

    async fn find_status(&mut self, id: Uuid) -> Result<Option<Status>>;

    async fn update_status(&mut self, status: &Status) -> Result<()>;

    /// Attachments currently linked to the status
    async fn media_attachments_for_status(&mut self, status_id: Uuid)
        -> Result<Vec<MediaAttachment>>;

    /// Insert or update the attachment
    async fn save_media_attachment(&mut self, attachment: &MediaAttachment) -> Result<()>;

    /// Point all the attachments at the given status (or at none)
    async fn set_media_attachments_status(
        &mut self,
        ids: &[Uuid],
        status_id: Option<Uuid>,
    ) -> Result<()>;

    async fn find_poll(&mut self, id: Uuid) -> Result<Option<Poll>>;

    async fn save_poll(&mut self, poll: &Poll) -> Result<()>;

    async fn delete_poll(&mut self, id: Uuid) -> Result<()>;

    /// Look up the tags by name (case-insensitively), creating the missing ones
    ///
    /// The returned tags are in the order of the input names
    async fn find_or_create_tags(&mut self, names: &[String]) -> Result<Vec<Tag>>;

    async fn mentions_for_status(&mut self, status_id: Uuid) -> Result<Vec<Mention>>;

    async fn insert_mention(&mut self, mention: &Mention) -> Result<()>;

    /// Flag all the mentions as silent in one go
    async fn silence_mentions(&mut self, ids: &[Uuid]) -> Result<()>;

    async fn find_custom_emoji(
        &mut self,
        shortcode: &str,
        domain: Option<&str>,
    ) -> Result<Option<CustomEmoji>>;

    /// Insert or update the emoji
    async fn save_custom_emoji(&mut self, emoji: &CustomEmoji) -> Result<()>;

    async fn count_status_edits(&mut self, status_id: Uuid) -> Result<u64>;

    async fn insert_status_edit(&mut self, edit: &StatusEdit) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Run the code inside a context with a database transaction
///
/// The transaction is committed if the closure returns `Ok` and rolled back otherwise
pub async fn with_transaction<'a, R, F>(store: &dyn Store, func: F) -> Result<R>
where
    F: for<'r> FnOnce(&'r mut dyn Transaction) -> ScopedBoxFuture<'a, 'r, Result<R>> + Send + 'a,
    R: Send + 'a,
{
    let mut tx = store.begin().await?;

    match func(tx.as_mut()).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                error!(error = ?rollback_error, "failed to roll back transaction");
            }

            Err(error)
        }
    }
}
