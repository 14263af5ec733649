use async_trait::async_trait;
use fedit_core::traits::{LockToken, Locker};
use fedit_error::Result;
use moka::{future::Cache, ops::compute::Op, Expiry};
use std::{
    future,
    time::{Duration, Instant},
};

#[derive(Clone)]
struct Lease {
    value: String,
    duration: Duration,
}

struct LeaseExpiry;

impl Expiry<String, Lease> for LeaseExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Lease,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.duration)
    }
}

/// Lease lock for a single process
#[derive(Clone)]
pub struct InMemoryLocker {
    leases: Cache<String, Lease>,
}

impl InMemoryLocker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            leases: Cache::builder().expire_after(LeaseExpiry).build(),
        }
    }
}

impl Default for InMemoryLocker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Locker for InMemoryLocker {
    #[instrument(skip_all, fields(%key))]
    async fn try_acquire(&self, key: &str, lease: Duration) -> Result<Option<LockToken>> {
        let value = crate::lease_value();

        let entry = self
            .leases
            .entry_by_ref(key)
            .or_insert_with(async {
                Lease {
                    value: value.clone(),
                    duration: lease,
                }
            })
            .await;

        if !entry.is_fresh() {
            debug!("lease is held by someone else");
            return Ok(None);
        }

        Ok(Some(LockToken {
            key: key.to_owned(),
            value,
        }))
    }

    #[instrument(skip_all, fields(key = %token.key))]
    async fn release(&self, token: LockToken) -> Result<()> {
        let LockToken { key, value } = token;

        self.leases
            .entry(key)
            .and_compute_with(|entry| {
                let op = match entry {
                    Some(entry) if entry.value().value == value => Op::Remove,
                    _ => Op::Nop,
                };

                future::ready(op)
            })
            .await;

        Ok(())
    }
}
