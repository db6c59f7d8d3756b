// src/db/document_store.rs

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    // Documento inexistente. O repositório converte isso em "ausente".
    #[error("Documento não encontrado")]
    NotFound,

    // Banco ou coleção ainda não provisionados.
    #[error("Recurso do store não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Documento já existe: {0}")]
    Conflict(String),

    #[error("Identificador inválido: {0}")]
    InvalidIdentifier(String),

    #[error("Erro de banco de dados: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Documento malformado: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Uma página de uma varredura completa de coleção.
#[derive(Debug, Default)]
pub struct Page {
    pub documents: Vec<Value>,
    /// Token para a próxima página; `None` quando a varredura terminou.
    pub continuation: Option<String>,
}

/// O store de documentos consumido pelos repositórios: um banco com uma
/// coleção por entidade, endereçada por chave string.
///
/// Implementações são compartilhadas entre requisições (`Arc<dyn DocumentStore>`)
/// e precisam ser seguras para uso concorrente.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn ensure_database(&self, database: &str) -> Result<(), StoreError>;

    async fn ensure_collection(&self, database: &str, collection: &str) -> Result<(), StoreError>;

    async fn read_document(&self, database: &str, collection: &str, id: &str) -> Result<Value, StoreError>;

    async fn create_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError>;

    async fn replace_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError>;

    async fn delete_document(&self, database: &str, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Varre a coleção em ordem de id, `page_size` documentos por vez.
    async fn query_documents(
        &self,
        database: &str,
        collection: &str,
        page_size: usize,
        continuation: Option<String>,
    ) -> Result<Page, StoreError>;
}

// Nomes de banco/coleção viram identificadores SQL, então só aceitamos [A-Za-z0-9_].
pub fn check_identifier(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_restricted() {
        assert!(check_identifier("EmpresaCollection").is_ok());
        assert!(check_identifier("administrativo_dev").is_ok());
        assert!(matches!(check_identifier(""), Err(StoreError::InvalidIdentifier(_))));
        assert!(matches!(
            check_identifier("x\"; DROP TABLE y; --"),
            Err(StoreError::InvalidIdentifier(_))
        ));
    }
}
