use crate::CacheBackend;
use fedit_error::Result;
use moka::future::Cache;
use std::{fmt::Display, marker::PhantomData, time::Duration};

/// Process-local backend
///
/// The moka handle is shared with whoever fills the cache, entries are keyed
/// by the [`Display`] rendering of the key.
pub struct InMemory<K, V>
where
    K: ?Sized,
{
    entries: Cache<String, V>,
    _key: PhantomData<K>,
}

impl<K, V> InMemory<K, V>
where
    K: Display + ?Sized,
    V: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self::shared(
            Cache::builder()
                .time_to_live(ttl)
                .max_capacity(capacity)
                .build(),
        )
    }

    /// Wrap an existing moka cache, clones of it see the same entries
    #[must_use]
    pub fn shared(entries: Cache<String, V>) -> Self {
        Self {
            entries,
            _key: PhantomData,
        }
    }
}

impl<K, V> CacheBackend<K> for InMemory<K, V>
where
    K: Display + Send + Sync + ?Sized,
    V: Clone + Send + Sync + 'static,
{
    async fn invalidate(&self, key: &K) -> Result<()> {
        self.entries.invalidate(&key.to_string()).await;
        Ok(())
    }
}
