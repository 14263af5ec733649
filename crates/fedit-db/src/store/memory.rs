//! Transactional in-memory store
//!
//! A transaction takes the table lock for its whole lifetime and works on a
//! copy of the tables. Committing swaps the copy in.

use super::{FailPoint, Store, Transaction};
use crate::{
    error::StoreError,
    model::{
        account::Account, custom_emoji::CustomEmoji, media_attachment::MediaAttachment,
        mention::Mention, poll::Poll, status::Status, status_edit::StatusEdit, tag::Tag,
    },
};
use async_trait::async_trait;
use fedit_error::Result;
use iso8601_timestamp::Timestamp;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct Tables {
    pub accounts: BTreeMap<Uuid, Account>,
    pub statuses: BTreeMap<Uuid, Status>,
    pub media_attachments: BTreeMap<Uuid, MediaAttachment>,
    pub polls: BTreeMap<Uuid, Poll>,
    pub mentions: BTreeMap<Uuid, Mention>,
    pub tags: BTreeMap<Uuid, Tag>,
    pub custom_emojis: BTreeMap<Uuid, CustomEmoji>,
    pub status_edits: Vec<StatusEdit>,
    fail_point: Option<FailPoint>,
}

impl Tables {
    fn check(&self, point: FailPoint) -> Result<()> {
        if self.fail_point == Some(point) {
            return Err(StoreError::Injected(point).into());
        }

        Ok(())
    }

    /// Edit history of the status, oldest first
    #[must_use]
    pub fn edits_of(&self, status_id: Uuid) -> Vec<&StatusEdit> {
        self.status_edits
            .iter()
            .filter(|edit| edit.status_id == status_id)
            .collect()
    }

    #[must_use]
    pub fn mentions_of(&self, status_id: Uuid) -> Vec<&Mention> {
        self.mentions
            .values()
            .filter(|mention| mention.status_id == status_id)
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every transaction fail once it reaches the given operation
    pub async fn fail_on(&self, point: Option<FailPoint>) {
        self.tables.lock().await.fail_point = point;
    }

    /// Read the committed state
    pub async fn read<F, T>(&self, func: F) -> T
    where
        F: FnOnce(&Tables) -> T,
    {
        func(&*self.tables.lock().await)
    }

    /// Write directly to the committed state, bypassing transactions
    pub async fn seed<F>(&self, func: F)
    where
        F: FnOnce(&mut Tables),
    {
        func(&mut *self.tables.lock().await);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn Transaction>> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();

        Ok(Box::new(MemoryTransaction { guard, working }))
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn find_account(&mut self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.working.accounts.get(&id).cloned())
    }

    async fn find_status(&mut self, id: Uuid) -> Result<Option<Status>> {
        Ok(self.working.statuses.get(&id).cloned())
    }

    async fn update_status(&mut self, status: &Status) -> Result<()> {
        self.working.check(FailPoint::UpdateStatus)?;

        let Some(row) = self.working.statuses.get_mut(&status.id) else {
            return Err(StoreError::NotFound("statuses").into());
        };
        *row = status.clone();

        Ok(())
    }

    async fn media_attachments_for_status(
        &mut self,
        status_id: Uuid,
    ) -> Result<Vec<MediaAttachment>> {
        Ok(self
            .working
            .media_attachments
            .values()
            .filter(|attachment| attachment.status_id == Some(status_id))
            .cloned()
            .collect())
    }

    async fn save_media_attachment(&mut self, attachment: &MediaAttachment) -> Result<()> {
        self.working.check(FailPoint::SaveMediaAttachment)?;

        if attachment.status_id.is_some() {
            let duplicate = self.working.media_attachments.values().any(|other| {
                other.id != attachment.id
                    && other.account_id == attachment.account_id
                    && other.status_id == attachment.status_id
                    && other.remote_url == attachment.remote_url
            });

            if duplicate {
                return Err(StoreError::UniqueViolation("media_attachments_remote_url").into());
            }
        }

        self.working
            .media_attachments
            .insert(attachment.id, attachment.clone());

        Ok(())
    }

    async fn set_media_attachments_status(
        &mut self,
        ids: &[Uuid],
        status_id: Option<Uuid>,
    ) -> Result<()> {
        for id in ids {
            let Some(attachment) = self.working.media_attachments.get_mut(id) else {
                return Err(StoreError::NotFound("media_attachments").into());
            };
            attachment.status_id = status_id;
        }

        Ok(())
    }

    async fn find_poll(&mut self, id: Uuid) -> Result<Option<Poll>> {
        Ok(self.working.polls.get(&id).cloned())
    }

    async fn save_poll(&mut self, poll: &Poll) -> Result<()> {
        self.working.check(FailPoint::SavePoll)?;
        self.working.polls.insert(poll.id, poll.clone());

        Ok(())
    }

    async fn delete_poll(&mut self, id: Uuid) -> Result<()> {
        self.working.polls.remove(&id);
        Ok(())
    }

    async fn find_or_create_tags(&mut self, names: &[String]) -> Result<Vec<Tag>> {
        let mut tags = Vec::with_capacity(names.len());

        for name in names {
            let folded = name.to_lowercase();
            let existing = self
                .working
                .tags
                .values()
                .find(|tag| tag.name.to_lowercase() == folded)
                .cloned();

            let tag = if let Some(tag) = existing {
                tag
            } else {
                let tag = Tag {
                    id: Uuid::now_v7(),
                    name: name.clone(),
                    created_at: Timestamp::now_utc(),
                };
                self.working.tags.insert(tag.id, tag.clone());
                tag
            };

            tags.push(tag);
        }

        Ok(tags)
    }

    async fn mentions_for_status(&mut self, status_id: Uuid) -> Result<Vec<Mention>> {
        Ok(self
            .working
            .mentions_of(status_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn insert_mention(&mut self, mention: &Mention) -> Result<()> {
        self.working.check(FailPoint::InsertMention)?;

        let duplicate = self.working.mentions.values().any(|other| {
            other.status_id == mention.status_id && other.account_id == mention.account_id
        });
        if duplicate {
            return Err(StoreError::UniqueViolation("mentions_status_account").into());
        }

        self.working.mentions.insert(mention.id, mention.clone());

        Ok(())
    }

    async fn silence_mentions(&mut self, ids: &[Uuid]) -> Result<()> {
        for id in ids {
            if let Some(mention) = self.working.mentions.get_mut(id) {
                mention.silent = true;
            }
        }

        Ok(())
    }

    async fn find_custom_emoji(
        &mut self,
        shortcode: &str,
        domain: Option<&str>,
    ) -> Result<Option<CustomEmoji>> {
        Ok(self
            .working
            .custom_emojis
            .values()
            .find(|emoji| emoji.shortcode == shortcode && emoji.domain.as_deref() == domain)
            .cloned())
    }

    async fn save_custom_emoji(&mut self, emoji: &CustomEmoji) -> Result<()> {
        let duplicate = self.working.custom_emojis.values().any(|other| {
            other.id != emoji.id && other.shortcode == emoji.shortcode && other.domain == emoji.domain
        });
        if duplicate {
            return Err(StoreError::UniqueViolation("custom_emojis_shortcode_domain").into());
        }

        self.working.custom_emojis.insert(emoji.id, emoji.clone());

        Ok(())
    }

    async fn count_status_edits(&mut self, status_id: Uuid) -> Result<u64> {
        Ok(self.working.edits_of(status_id).len() as u64)
    }

    async fn insert_status_edit(&mut self, edit: &StatusEdit) -> Result<()> {
        self.working.check(FailPoint::InsertStatusEdit)?;
        self.working.status_edits.push(edit.clone());

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let Self { mut guard, working } = *self;
        *guard = working;

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
