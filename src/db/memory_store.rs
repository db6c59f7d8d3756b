// src/db/memory_store.rs

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::document_store::{check_identifier, DocumentStore, Page, StoreError};

type Collection = BTreeMap<String, Value>;
type Database = HashMap<String, Collection>;

/// Store de documentos em memória. Usado nos testes e em execuções locais
/// (`DOCUMENT_STORE=memory`). Mantém a mesma semântica do store Postgres,
/// inclusive a falha ao operar numa coleção não provisionada.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    databases: RwLock<HashMap<String, Database>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn collection_mut<'a>(
    databases: &'a mut HashMap<String, Database>,
    database: &str,
    collection: &str,
) -> Result<&'a mut Collection, StoreError> {
    databases
        .get_mut(database)
        .ok_or_else(|| StoreError::ResourceNotFound(database.to_string()))?
        .get_mut(collection)
        .ok_or_else(|| StoreError::ResourceNotFound(format!("{database}/{collection}")))
}

fn collection_ref<'a>(
    databases: &'a HashMap<String, Database>,
    database: &str,
    collection: &str,
) -> Result<&'a Collection, StoreError> {
    databases
        .get(database)
        .ok_or_else(|| StoreError::ResourceNotFound(database.to_string()))?
        .get(collection)
        .ok_or_else(|| StoreError::ResourceNotFound(format!("{database}/{collection}")))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn ensure_database(&self, database: &str) -> Result<(), StoreError> {
        check_identifier(database)?;
        self.databases.write().await.entry(database.to_string()).or_default();
        Ok(())
    }

    async fn ensure_collection(&self, database: &str, collection: &str) -> Result<(), StoreError> {
        check_identifier(collection)?;
        let mut databases = self.databases.write().await;
        databases
            .get_mut(database)
            .ok_or_else(|| StoreError::ResourceNotFound(database.to_string()))?
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    async fn read_document(&self, database: &str, collection: &str, id: &str) -> Result<Value, StoreError> {
        let databases = self.databases.read().await;
        collection_ref(&databases, database, collection)?
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let mut databases = self.databases.write().await;
        let documents = collection_mut(&mut databases, database, collection)?;
        if documents.contains_key(id) {
            return Err(StoreError::Conflict(id.to_string()));
        }
        documents.insert(id.to_string(), body.clone());
        Ok(body)
    }

    async fn replace_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let mut databases = self.databases.write().await;
        let stored = collection_mut(&mut databases, database, collection)?
            .get_mut(id)
            .ok_or(StoreError::NotFound)?;
        *stored = body.clone();
        Ok(body)
    }

    async fn delete_document(&self, database: &str, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut databases = self.databases.write().await;
        collection_mut(&mut databases, database, collection)?
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn query_documents(
        &self,
        database: &str,
        collection: &str,
        page_size: usize,
        continuation: Option<String>,
    ) -> Result<Page, StoreError> {
        let databases = self.databases.read().await;
        let documents = collection_ref(&databases, database, collection)?;

        let lower = match &continuation {
            Some(last_id) => Bound::Excluded(last_id.clone()),
            None => Bound::Unbounded,
        };

        let page: Vec<(&String, &Value)> = documents
            .range((lower, Bound::Unbounded))
            .take(page_size.max(1))
            .collect();

        // Só devolve continuação se ainda houver algo depois da página.
        let continuation = match page.last() {
            Some((last_id, _)) => documents
                .range::<String, _>((Bound::Excluded((*last_id).clone()), Bound::Unbounded))
                .next()
                .map(|_| (*last_id).clone()),
            None => None,
        };

        Ok(Page {
            documents: page.into_iter().map(|(_, doc)| doc.clone()).collect(),
            continuation,
        })
    }
}
