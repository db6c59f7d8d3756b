// src/cache/redis_cache.rs

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tokio::{sync::OnceCell, time::timeout};

use super::{CacheEntryOptions, CacheError, CacheLookup, DistributedCache};

/// Cache distribuído sobre Redis.
///
/// A conexão é aberta no primeiro uso; se o Redis estiver fora, a tentativa
/// é repetida na próxima chamada. Toda operação tem um limite de tempo.
pub struct RedisCache {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    op_timeout: Duration,
}

impl RedisCache {
    /// Só valida a URL; não abre conexão.
    pub fn new(url: &str, op_timeout: Duration) -> Result<Self, CacheError> {
        Ok(Self {
            client: Client::open(url)?,
            connection: OnceCell::new(),
            op_timeout,
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = timeout(self.op_timeout, ConnectionManager::new(self.client.clone()))
                    .await
                    .map_err(|_| CacheError::Timeout)??;
                tracing::info!("✅ Conexão com o Redis estabelecida");
                Ok::<_, CacheError>(manager)
            })
            .await?;

        Ok(manager.clone())
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value = timeout(self.op_timeout, conn.get::<_, Option<String>>(key))
            .await
            .map_err(|_| CacheError::Timeout)??;
        Ok(value)
    }
}

#[async_trait]
impl DistributedCache for RedisCache {
    async fn try_get(&self, key: &str) -> CacheLookup {
        match self.get_string(key).await {
            Ok(Some(value)) => CacheLookup::Hit(value),
            Ok(None) => CacheLookup::Miss,
            Err(e) => {
                tracing::warn!("Cache indisponível ao ler '{}': {}", key, e);
                CacheLookup::Unavailable
            }
        }
    }

    async fn set(&self, key: &str, value: &str, options: CacheEntryOptions) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        // SET EX não aceita zero; arredonda para pelo menos 1 segundo.
        let seconds = options.absolute_expiration_relative_to_now.as_secs().max(1);

        timeout(self.op_timeout, conn.set_ex::<_, _, ()>(key, value, seconds))
            .await
            .map_err(|_| CacheError::Timeout)??;
        Ok(())
    }
}
