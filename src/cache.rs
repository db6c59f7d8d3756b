// src/cache.rs
//
// Cache distribuído usado como acelerador das leituras da V2. Ele nunca é
// requisito: indisponibilidade vira `CacheLookup::Unavailable` e a leitura
// segue direto para o serviço.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory_cache;
pub mod redis_cache;

pub use memory_cache::InMemoryCache;
pub use redis_cache::RedisCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Erro do Redis: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Tempo esgotado falando com o cache")]
    Timeout,
}

/// Resultado de uma consulta ao cache. Miss e indisponibilidade são
/// distintos, mesmo que ambos levem a uma chamada ao serviço.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(String),
    Miss,
    Unavailable,
}

/// Expiração absoluta contada a partir da gravação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntryOptions {
    pub absolute_expiration_relative_to_now: Duration,
}

impl CacheEntryOptions {
    pub fn expiring_in(ttl: Duration) -> Self {
        Self {
            absolute_expiration_relative_to_now: ttl,
        }
    }
}

impl Default for CacheEntryOptions {
    fn default() -> Self {
        Self::expiring_in(Duration::from_secs(120))
    }
}

#[async_trait]
pub trait DistributedCache: Send + Sync {
    /// Nunca falha: erro de transporte é reportado como `Unavailable`.
    async fn try_get(&self, key: &str) -> CacheLookup;

    async fn set(&self, key: &str, value: &str, options: CacheEntryOptions) -> Result<(), CacheError>;
}

/// Cache não configurado: toda consulta é `Unavailable` e toda escrita é ignorada.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCache;

#[async_trait]
impl DistributedCache for NoOpCache {
    async fn try_get(&self, _key: &str) -> CacheLookup {
        CacheLookup::Unavailable
    }

    async fn set(&self, _key: &str, _value: &str, _options: CacheEntryOptions) -> Result<(), CacheError> {
        Ok(())
    }
}
