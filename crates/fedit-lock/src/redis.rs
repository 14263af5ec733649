use async_trait::async_trait;
use fedit_core::traits::{LockToken, Locker};
use fedit_error::Result;
use fred::{
    clients::RedisPool,
    interfaces::KeysInterface,
    types::{Expiration, Script, SetOptions},
};
use std::{sync::LazyLock, time::Duration};
use typed_builder::TypedBuilder;

// Compare-and-delete has to happen atomically, hence the script
static RELEASE_SCRIPT: LazyLock<Script> =
    LazyLock::new(|| Script::from_lua(include_str!("../lua/release.lua")));

/// Lease lock backed by `SET NX PX`
///
/// The lease expires on its own if the holder crashes
#[derive(Clone, TypedBuilder)]
pub struct RedisLocker {
    redis_pool: RedisPool,
}

impl RedisLocker {
    #[must_use]
    pub fn new(redis_pool: RedisPool) -> Self {
        Self::builder().redis_pool(redis_pool).build()
    }
}

#[async_trait]
impl Locker for RedisLocker {
    #[instrument(skip_all, fields(%key))]
    async fn try_acquire(&self, key: &str, lease: Duration) -> Result<Option<LockToken>> {
        let value = crate::lease_value();
        let lease_ms = i64::try_from(lease.as_millis()).unwrap_or(i64::MAX);

        let reply: Option<String> = self
            .redis_pool
            .set(
                key,
                value.as_str(),
                Some(Expiration::PX(lease_ms)),
                Some(SetOptions::NX),
                false,
            )
            .await?;

        if reply.is_none() {
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
        let deleted: i64 = RELEASE_SCRIPT
            .evalsha_with_reload(
                self.redis_pool.next(),
                token.key.as_str(),
                token.value.as_str(),
            )
            .await?;

        if deleted == 0 {
            debug!("lease expired before release");
        }

        Ok(())
    }
}
