use crate::parser::EmojiDescriptor;
use fedit_core::traits::{AccountResolver, Fetcher};
use fedit_db::{
    model::{account::Account, custom_emoji::CustomEmoji, mention::Mention, status::Status},
    Transaction,
};
use fedit_error::Result;
use iso8601_timestamp::Timestamp;
use std::time::Duration;
use uuid::Uuid;

/// How mentioned accounts are looked up
pub struct AccountLookup<'a> {
    pub resolver: &'a dyn AccountResolver,
    pub fetcher: &'a dyn Fetcher,
    /// Upper bound for a single remote fetch. We are holding the lock while waiting.
    pub fetch_timeout: Duration,
}

impl AccountLookup<'_> {
    /// Resolve the account locally, fetching it if unknown
    ///
    /// Failures are logged and treated as unresolvable
    async fn resolve(&self, uri: &str) -> Option<Account> {
        match self.resolver.resolve_local_account(uri).await {
            Ok(Some(account)) => return Some(account),
            Ok(None) => {}
            Err(error) => warn!(?error, %uri, "local account lookup failed"),
        }

        match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch_account(uri)).await {
            Ok(Ok(account)) => {
                if account.is_none() {
                    debug!(%uri, "mentioned account not found");
                }
                account
            }
            Ok(Err(error)) => {
                warn!(?error, %uri, "failed to fetch mentioned account");
                None
            }
            Err(..) => {
                warn!(%uri, timeout = ?self.fetch_timeout, "fetching mentioned account timed out");
                None
            }
        }
    }
}

/// Replace the hashtags of the status
pub async fn reconcile_tags(
    tx: &mut dyn Transaction,
    status: &mut Status,
    names: &[String],
) -> Result<()> {
    let tags = tx.find_or_create_tags(names).await?;
    status.tag_ids = tags.into_iter().map(|tag| tag.id).collect();
    tx.update_status(status).await?;

    Ok(())
}

/// Merge the mentions of the status
///
/// Mentions are never deleted. Accounts no longer referenced have their
/// mention flipped to silent, so nobody gets notified about it again.
#[instrument(skip_all, fields(status_id = %status.id))]
pub async fn reconcile_mentions(
    tx: &mut dyn Transaction,
    status: &Status,
    uris: &[String],
    lookup: &AccountLookup<'_>,
    now: Timestamp,
) -> Result<()> {
    let mut account_ids: Vec<Uuid> = Vec::with_capacity(uris.len());
    for uri in uris {
        if let Some(account) = lookup.resolve(uri).await {
            if !account_ids.contains(&account.id) {
                account_ids.push(account.id);
            }
        }
    }

    let existing = tx.mentions_for_status(status.id).await?;

    for account_id in &account_ids {
        if existing
            .iter()
            .any(|mention| mention.account_id == *account_id)
        {
            continue;
        }

        tx.insert_mention(&Mention {
            id: Uuid::now_v7(),
            status_id: status.id,
            account_id: *account_id,
            silent: false,
            created_at: now,
        })
        .await?;
    }

    let dropped: Vec<Uuid> = existing
        .iter()
        .filter(|mention| !mention.silent && !account_ids.contains(&mention.account_id))
        .map(|mention| mention.id)
        .collect();

    if !dropped.is_empty() {
        debug!(count = dropped.len(), "silencing dropped mentions");
        tx.silence_mentions(&dropped).await?;
    }

    Ok(())
}

fn needs_update(existing: Option<&CustomEmoji>, descriptor: &EmojiDescriptor) -> bool {
    let Some(existing) = existing else {
        return true;
    };

    existing.image_remote_url != descriptor.image_url
        || descriptor
            .updated
            .is_some_and(|updated| updated > existing.updated_at)
}

/// Create or refresh the custom emojis used by the status
///
/// Returns the emojis whose image has to be downloaded
#[instrument(skip_all, fields(account_id = %account.id))]
pub async fn reconcile_emojis(
    tx: &mut dyn Transaction,
    account: &Account,
    descriptors: &[EmojiDescriptor],
    rejected: bool,
    now: Timestamp,
) -> Result<Vec<Uuid>> {
    if rejected {
        debug!("media of origin rejected, skipping emojis");
        return Ok(Vec::new());
    }

    let domain = account.domain.as_deref();
    let mut to_fetch = Vec::new();

    for descriptor in descriptors {
        let existing = tx.find_custom_emoji(&descriptor.shortcode, domain).await?;
        if !needs_update(existing.as_ref(), descriptor) {
            continue;
        }

        let updated_at = descriptor.updated.unwrap_or(now);
        let emoji = match existing {
            Some(emoji) => CustomEmoji {
                image_remote_url: descriptor.image_url.clone(),
                uri: descriptor.uri.clone().or(emoji.uri),
                updated_at,
                ..emoji
            },
            None => CustomEmoji {
                id: Uuid::now_v7(),
                shortcode: descriptor.shortcode.clone(),
                domain: domain.map(ToOwned::to_owned),
                uri: descriptor.uri.clone(),
                image_remote_url: descriptor.image_url.clone(),
                created_at: now,
                updated_at,
            },
        };

        debug!(shortcode = %emoji.shortcode, "storing custom emoji");
        tx.save_custom_emoji(&emoji).await?;
        to_fetch.push(emoji.id);
    }

    Ok(to_fetch)
}
