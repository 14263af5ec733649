use crate::CacheBackend;
use fedit_error::Result;
use fred::{clients::RedisPool, interfaces::KeysInterface};
use std::{fmt::Display, marker::PhantomData};
use typed_builder::TypedBuilder;

/// Backend shared with other processes through Redis
///
/// Entries live under `<namespace>:<prefix>:<key>`.
#[derive(TypedBuilder)]
pub struct Redis<K, V>
where
    K: ?Sized,
{
    #[builder(default = "FEDIT-CACHE".into())]
    namespace: String,
    #[builder(setter(into))]
    prefix: String,
    redis_pool: RedisPool,

    #[builder(default, setter(skip))]
    _key: PhantomData<K>,
    #[builder(default, setter(skip))]
    _value: PhantomData<V>,
}

impl<K, V> Redis<K, V>
where
    K: Display + ?Sized,
{
    fn entry_key(&self, key: &K) -> String {
        format!("{}:{}:{key}", self.namespace, self.prefix)
    }
}

impl<K, V> CacheBackend<K> for Redis<K, V>
where
    K: Display + Send + Sync + ?Sized,
    V: Send + Sync,
{
    #[instrument(skip_all, fields(%key))]
    async fn invalidate(&self, key: &K) -> Result<()> {
        let key = self.entry_key(key);

        let removed: u64 = self.redis_pool.del(key.as_str()).await?;
        debug!(%key, removed, "invalidated cache entry");

        Ok(())
    }
}
