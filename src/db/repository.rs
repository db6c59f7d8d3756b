// src/db/repository.rs

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::document_store::{DocumentStore, StoreError};
use crate::{
    common::error::AppError,
    models::{Company, CompanyType, Entity, Profile, ProfileUser, User},
};

// Um repositório por entidade, cada um ligado à sua coleção.
pub type CompanyRepository = Repository<Company>;
pub type CompanyTypeRepository = Repository<CompanyType>;
pub type ProfileRepository = Repository<Profile>;
pub type UserRepository = Repository<User>;
pub type ProfileUserRepository = Repository<ProfileUser>;

/// Repositório genérico sobre uma coleção do store de documentos.
///
/// O banco e a coleção são provisionados no primeiro uso. Clones
/// compartilham o mesmo estado de provisionamento.
pub struct Repository<T: Entity> {
    store: Arc<dyn DocumentStore>,
    database_id: Arc<str>,
    page_size: usize,
    provisioned: Arc<OnceCell<()>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            database_id: self.database_id.clone(),
            page_size: self.page_size,
            provisioned: self.provisioned.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>, database_id: &str, page_size: usize) -> Self {
        Self {
            store,
            database_id: Arc::from(database_id),
            page_size,
            provisioned: Arc::new(OnceCell::new()),
            _entity: PhantomData,
        }
    }

    // Se falhar, a célula continua vazia e a próxima chamada tenta de novo.
    async fn ensure_provisioned(&self) -> Result<(), AppError> {
        self.provisioned
            .get_or_try_init(|| async {
                self.store.ensure_database(&self.database_id).await?;
                self.store.ensure_collection(&self.database_id, T::COLLECTION).await?;
                tracing::info!("✅ Coleção {}/{} provisionada", self.database_id, T::COLLECTION);
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<T>, AppError> {
        self.ensure_provisioned().await?;

        let mut items = Vec::new();
        let mut continuation = None;

        loop {
            let page = self
                .store
                .query_documents(&self.database_id, T::COLLECTION, self.page_size, continuation)
                .await?;

            for document in page.documents {
                items.push(serde_json::from_value(document)?);
            }

            match page.continuation {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(items)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<T>, AppError> {
        self.ensure_provisioned().await?;

        match self.store.read_document(&self.database_id, T::COLLECTION, id).await {
            Ok(document) => Ok(Some(serde_json::from_value(document)?)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn add(&self, item: &T) -> Result<T, AppError> {
        self.ensure_provisioned().await?;

        let id = item.id().to_string();
        let stored = self
            .store
            .create_document(&self.database_id, T::COLLECTION, &id, serde_json::to_value(item)?)
            .await?;

        Ok(serde_json::from_value(stored)?)
    }

    pub async fn replace(&self, id: &str, item: &T) -> Result<Option<T>, AppError> {
        self.ensure_provisioned().await?;

        let body = serde_json::to_value(item)?;
        match self.store.replace_document(&self.database_id, T::COLLECTION, id, body).await {
            Ok(stored) => Ok(Some(serde_json::from_value(stored)?)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn remove_by_id(&self, id: &str) -> Result<(), AppError> {
        self.ensure_provisioned().await?;

        self.store.delete_document(&self.database_id, T::COLLECTION, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryDocumentStore;
    use uuid::Uuid;

    fn profile(code: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            short_code: code.to_string(),
            description: format!("Perfil {code}"),
        }
    }

    fn repository(page_size: usize) -> ProfileRepository {
        Repository::new(Arc::new(InMemoryDocumentStore::new()), "administrativo", page_size)
    }

    #[tokio::test]
    async fn first_use_provisions_the_collection() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let repo: ProfileRepository = Repository::new(store.clone(), "administrativo", 10);

        assert!(repo.list_all().await.unwrap().is_empty());
        // Coleção existe: a leitura falha como documento ausente, não como recurso ausente.
        assert!(matches!(
            store.read_document("administrativo", "PerfilCollection", "x").await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn missing_keys_are_absent_not_errors() {
        let repo = repository(10);
        let id = Uuid::new_v4().to_string();

        assert!(repo.get_by_id(&id).await.unwrap().is_none());
        assert!(repo.replace(&id, &profile("ADM")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_missing_key_propagates() {
        let repo = repository(10);
        let result = repo.remove_by_id("nope").await;
        assert!(matches!(result, Err(AppError::Store(StoreError::NotFound))));
    }

    #[tokio::test]
    async fn list_all_drains_every_page() {
        let repo = repository(2);
        for code in ["A", "B", "C", "D", "E"] {
            repo.add(&profile(code)).await.unwrap();
        }

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn add_then_replace_round_trips() {
        let repo = repository(10);
        let mut item = profile("OPR");
        let created = repo.add(&item).await.unwrap();
        assert_eq!(created, item);

        item.description = "Operador".to_string();
        let key = item.id.to_string();
        let replaced = repo.replace(&key, &item).await.unwrap();
        assert_eq!(replaced.as_ref(), Some(&item));
        assert_eq!(repo.get_by_id(&key).await.unwrap(), Some(item));
    }
}
