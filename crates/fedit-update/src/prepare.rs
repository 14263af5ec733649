//! Construction of the backends selected in the configuration

use eyre::WrapErr;
use fedit_cache::{ArcCache, InMemoryCache, NoopCache, RedisCache};
use fedit_config::{cache, lock, media};
use fedit_core::traits::{Locker, MediaPolicy};
use fedit_federation_filter::MediaRejectFilter;
use fedit_lock::{InMemoryLocker, RedisLocker};
use fred::{clients::RedisPool, interfaces::ClientLike, types::RedisConfig};
use std::{fmt::Display, sync::Arc, time::Duration};

const CACHE_CAPACITY: u64 = 100;
const CACHE_TTL: Duration = Duration::from_secs(60);

pub async fn redis_pool(url: &str) -> eyre::Result<RedisPool> {
    let config = RedisConfig::from_url(url).wrap_err("invalid redis url")?;
    let pool = RedisPool::new(config, None, None, None, 10)?;
    pool.init().await.wrap_err("failed to connect to redis")?;

    Ok(pool)
}

pub async fn locker(config: &lock::Configuration) -> eyre::Result<Arc<dyn Locker>> {
    let locker: Arc<dyn Locker> = match config {
        lock::Configuration::InMemory(..) => Arc::new(InMemoryLocker::new()),
        lock::Configuration::Redis(redis_config) => {
            let pool = redis_pool(redis_config.url.as_str()).await?;
            Arc::new(RedisLocker::new(pool))
        }
    };

    Ok(locker)
}

pub async fn cache<K, V>(
    config: &cache::Configuration,
    cache_name: &str,
) -> eyre::Result<ArcCache<K, V>>
where
    K: Display + Send + Sync + ?Sized + 'static,
    V: Clone + Send + Sync + 'static,
{
    let cache = match config {
        cache::Configuration::InMemory => InMemoryCache::new(CACHE_CAPACITY, CACHE_TTL).into(),
        cache::Configuration::None => NoopCache.into(),
        cache::Configuration::Redis(redis_config) => {
            let pool = redis_pool(redis_config.url.as_str()).await?;

            RedisCache::builder()
                .redis_pool(pool)
                .prefix(cache_name)
                .build()
                .into()
        }
    };

    Ok(Arc::new(cache))
}

pub fn media_policy(config: &media::Configuration) -> eyre::Result<Arc<dyn MediaPolicy>> {
    let filter = MediaRejectFilter::new(config)
        .map_err(fedit_error::Error::into_error)
        .wrap_err("invalid media reject pattern")?;

    Ok(Arc::new(filter))
}
