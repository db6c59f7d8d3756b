// src/cache/memory_cache.rs

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{future::Cache, Expiry};

use super::{CacheEntryOptions, CacheError, CacheLookup, DistributedCache};

#[derive(Debug, Clone)]
struct CachedValue {
    value: String,
    ttl: Duration,
}

// Cada entrada expira conforme as opções passadas na gravação.
struct AbsoluteExpiry;

impl Expiry<String, CachedValue> for AbsoluteExpiry {
    fn expire_after_create(&self, _key: &String, value: &CachedValue, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Cache local (moka) com a mesma interface do cache distribuído.
/// Útil para rodar sem Redis e nos testes.
#[derive(Clone)]
pub struct InMemoryCache {
    cache: Cache<String, CachedValue>,
}

impl InMemoryCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(AbsoluteExpiry)
            .build();

        Self { cache }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl DistributedCache for InMemoryCache {
    async fn try_get(&self, key: &str) -> CacheLookup {
        match self.cache.get(key).await {
            Some(entry) => CacheLookup::Hit(entry.value),
            None => CacheLookup::Miss,
        }
    }

    async fn set(&self, key: &str, value: &str, options: CacheEntryOptions) -> Result<(), CacheError> {
        let entry = CachedValue {
            value: value.to_string(),
            ttl: options.absolute_expiration_relative_to_now,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }
}
