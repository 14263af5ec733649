#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(forbidden_lint_groups)]

#[macro_use]
extern crate tracing;

use enum_dispatch::enum_dispatch;
use fedit_error::Result;
use std::{fmt::Display, sync::Arc};

pub use self::{in_memory::InMemory as InMemoryCache, redis::Redis as RedisCache};

mod in_memory;
mod redis;

pub type ArcCache<K, V> = Arc<AnyCache<K, V>>;

/// Cache whose entries are written by another component, e.g. the link
/// preview generator, and only dropped by us once they went stale
#[enum_dispatch(CacheBackend<K>)]
pub enum AnyCache<K, V>
where
    K: Display + Send + Sync + ?Sized,
    V: Clone + Send + Sync + 'static,
{
    InMemory(InMemoryCache<K, V>),
    Noop(NoopCache),
    Redis(RedisCache<K, V>),
}

#[enum_dispatch]
#[allow(async_fn_in_trait)] // Because of `enum_dispatch`
pub trait CacheBackend<K>: Send + Sync
where
    K: ?Sized,
{
    /// Drop the entry stored under the key, if there is one
    async fn invalidate(&self, key: &K) -> Result<()>;
}

/// Cache that never stores anything
#[derive(Clone)]
pub struct NoopCache;

impl<K> CacheBackend<K> for NoopCache
where
    K: Send + Sync + ?Sized,
{
    async fn invalidate(&self, _key: &K) -> Result<()> {
        Ok(())
    }
}
