// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    cache::{CacheEntryOptions, DistributedCache, InMemoryCache, NoOpCache, RedisCache},
    db::{DocumentStore, InMemoryDocumentStore, PgDocumentStore, Repository},
    services::{CompanyService, CompanyTypeService, EntityService, ProfileService, ProfileUserService, UserService},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Disabled,
    Redis(String),
    Memory,
}

// Configuração lida uma única vez na inicialização.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub store: StoreBackend,
    pub database_id: String,
    pub page_size: usize,
    pub cache: CacheBackend,
    pub cache_ttl: Duration,
    pub cache_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let store = match get("DOCUMENT_STORE").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                database_url: get("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            },
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("DOCUMENT_STORE desconhecido: {other} (use 'postgres' ou 'memory')"),
        };

        let cache = match get("CACHE_URL") {
            None => CacheBackend::Disabled,
            Some(url) if url.trim().is_empty() => CacheBackend::Disabled,
            Some(url) if url == "memory" => CacheBackend::Memory,
            Some(url) => CacheBackend::Redis(url),
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            store,
            database_id: get("DOCUMENT_DATABASE_ID").unwrap_or_else(|| "administrativo".to_string()),
            page_size: parse_or(&get, "STORE_PAGE_SIZE", 100)?,
            cache,
            cache_ttl: Duration::from_secs(parse_or(&get, "CACHE_TTL_SECONDS", 120)?),
            cache_timeout: Duration::from_millis(parse_or(&get, "CACHE_TIMEOUT_MS", 500)?),
        })
    }
}

fn parse_or<N>(get: &impl Fn(&str) -> Option<String>, key: &str, default: N) -> anyhow::Result<N>
where
    N: std::str::FromStr,
    N::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw.trim().parse().with_context(|| format!("{key} inválido: {raw}")),
        None => Ok(default),
    }
}

// Um serviço por entidade, todos sobre o mesmo store.
#[derive(Clone)]
pub struct Services {
    pub company: CompanyService,
    pub company_type: CompanyTypeService,
    pub profile: ProfileService,
    pub user: UserService,
    pub profile_user: ProfileUserService,
}

impl Services {
    pub fn new(store: Arc<dyn DocumentStore>, database_id: &str, page_size: usize) -> Self {
        Self {
            company: EntityService::new(Repository::new(store.clone(), database_id, page_size)),
            company_type: EntityService::new(Repository::new(store.clone(), database_id, page_size)),
            profile: EntityService::new(Repository::new(store.clone(), database_id, page_size)),
            user: EntityService::new(Repository::new(store.clone(), database_id, page_size)),
            profile_user: EntityService::new(Repository::new(store, database_id, page_size)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub cache: Arc<dyn DistributedCache>,
    pub cache_options: CacheEntryOptions,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = match &settings.store {
            StoreBackend::Postgres { database_url } => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                Arc::new(PgDocumentStore::new(db_pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Usando store de documentos em memória; nada será persistido.");
                Arc::new(InMemoryDocumentStore::new())
            }
        };

        // O cache é opcional: URL inválida impede a subida, Redis fora do ar não.
        let cache: Arc<dyn DistributedCache> = match &settings.cache {
            CacheBackend::Disabled => {
                tracing::info!("Cache não configurado; leituras vão direto ao store.");
                Arc::new(NoOpCache)
            }
            CacheBackend::Memory => Arc::new(InMemoryCache::default()),
            CacheBackend::Redis(url) => Arc::new(
                RedisCache::new(url, settings.cache_timeout).context("CACHE_URL inválida")?,
            ),
        };

        Ok(Self::from_parts(
            store,
            cache,
            &settings.database_id,
            settings.page_size,
            CacheEntryOptions::expiring_in(settings.cache_ttl),
        ))
    }

    // Monta o gráfico de dependências a partir de clientes já criados.
    pub fn from_parts(
        store: Arc<dyn DocumentStore>,
        cache: Arc<dyn DistributedCache>,
        database_id: &str,
        page_size: usize,
        cache_options: CacheEntryOptions,
    ) -> Self {
        Self {
            services: Services::new(store, database_id, page_size),
            cache,
            cache_options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn postgres_requires_database_url() {
        assert!(settings(&[]).is_err());

        let parsed = settings(&[("DATABASE_URL", "postgres://localhost/adm")]).unwrap();
        assert_eq!(
            parsed.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/adm".to_string()
            }
        );
        assert_eq!(parsed.database_id, "administrativo");
        assert_eq!(parsed.cache, CacheBackend::Disabled);
        assert_eq!(parsed.cache_ttl, Duration::from_secs(120));
    }

    #[test]
    fn cache_url_selects_backend() {
        let memory = settings(&[("DOCUMENT_STORE", "memory"), ("CACHE_URL", "memory")]).unwrap();
        assert_eq!(memory.cache, CacheBackend::Memory);

        let redis = settings(&[("DOCUMENT_STORE", "memory"), ("CACHE_URL", "redis://cache:6379")]).unwrap();
        assert_eq!(redis.cache, CacheBackend::Redis("redis://cache:6379".to_string()));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let result = settings(&[("DOCUMENT_STORE", "memory"), ("CACHE_TTL_SECONDS", "dois")]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_store_is_rejected() {
        assert!(settings(&[("DOCUMENT_STORE", "cosmos")]).is_err());
    }
}
