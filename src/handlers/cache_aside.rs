// src/handlers/cache_aside.rs

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    cache::{CacheEntryOptions, CacheLookup, DistributedCache},
    common::error::AppError,
};

/// Leitura "cache-aside": consulta o cache, e no miss chama o serviço e
/// popula o cache. Falhas do cache nunca mudam o resultado.
#[derive(Clone)]
pub struct CacheAside {
    cache: Arc<dyn DistributedCache>,
    options: CacheEntryOptions,
}

impl CacheAside {
    pub fn new(cache: Arc<dyn DistributedCache>, options: CacheEntryOptions) -> Self {
        Self { cache, options }
    }

    pub async fn read_through<V, F, Fut>(&self, key: &str, load: F) -> Result<V, AppError>
    where
        V: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError>>,
    {
        match self.cache.try_get(key).await {
            // Cache fora do ar: vai direto ao serviço e nem tenta gravar.
            CacheLookup::Unavailable => return load().await,

            CacheLookup::Hit(raw) if !raw.trim().is_empty() => match serde_json::from_str::<V>(&raw) {
                Ok(value) => {
                    tracing::debug!("Cache hit em '{}'", key);
                    return Ok(value);
                }
                Err(e) => tracing::warn!("Valor em cache ilegível em '{}': {}", key, e),
            },

            // Miss ou valor vazio
            _ => {}
        }

        let value = load().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(key, &raw, self.options).await {
                    tracing::warn!("Falha ao gravar '{}' no cache: {}", key, e);
                }
            }
            Err(e) => tracing::warn!("Falha ao serializar '{}' para o cache: {}", key, e),
        }

        Ok(value)
    }
}
