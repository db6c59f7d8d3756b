// src/db/pg_store.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use super::document_store::{check_identifier, DocumentStore, Page, StoreError};

/// Store de documentos sobre Postgres: cada "banco" é um schema e cada
/// coleção é uma tabela `(id TEXT PRIMARY KEY, body JSONB)`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Nome qualificado e já validado: "schema"."tabela"
fn table(database: &str, collection: &str) -> Result<String, StoreError> {
    check_identifier(database)?;
    check_identifier(collection)?;
    Ok(format!("\"{database}\".\"{collection}\""))
}

// 42P01 = undefined_table, 3F000 = invalid_schema_name
fn map_missing_resource(e: sqlx::Error, database: &str, collection: &str) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if matches!(db_err.code().as_deref(), Some("42P01") | Some("3F000")) {
            return StoreError::ResourceNotFound(format!("{database}/{collection}"));
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn ensure_database(&self, database: &str) -> Result<(), StoreError> {
        check_identifier(database)?;
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS \"{database}\""))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ensure_collection(&self, database: &str, collection: &str) -> Result<(), StoreError> {
        let table = table(database, collection)?;
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY,
                body JSONB NOT NULL
            )
            "#
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| map_missing_resource(e, database, collection))?;
        Ok(())
    }

    async fn read_document(&self, database: &str, collection: &str, id: &str) -> Result<Value, StoreError> {
        let table = table(database, collection)?;
        let row = sqlx::query(&format!("SELECT body FROM {table} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_missing_resource(e, database, collection))?;

        match row {
            Some(row) => Ok(row.try_get::<Value, _>("body")?),
            None => Err(StoreError::NotFound),
        }
    }

    async fn create_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let table = table(database, collection)?;
        let row = sqlx::query(&format!("INSERT INTO {table} (id, body) VALUES ($1, $2) RETURNING body"))
            .bind(id)
            .bind(&body)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                // Chave duplicada vira conflito; o resto sobe como está.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return StoreError::Conflict(id.to_string());
                    }
                }
                map_missing_resource(e, database, collection)
            })?;

        Ok(row.try_get::<Value, _>("body")?)
    }

    async fn replace_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let table = table(database, collection)?;
        let row = sqlx::query(&format!(
            "UPDATE {table} SET body = $2 WHERE id = $1 RETURNING body"
        ))
        .bind(id)
        .bind(&body)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_missing_resource(e, database, collection))?;

        match row {
            Some(row) => Ok(row.try_get::<Value, _>("body")?),
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete_document(&self, database: &str, collection: &str, id: &str) -> Result<(), StoreError> {
        let table = table(database, collection)?;
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_missing_resource(e, database, collection))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn query_documents(
        &self,
        database: &str,
        collection: &str,
        page_size: usize,
        continuation: Option<String>,
    ) -> Result<Page, StoreError> {
        let table = table(database, collection)?;
        let page_size = page_size.max(1);
        // Busca um a mais para saber se existe próxima página.
        let limit = i64::try_from(page_size).unwrap_or(i64::MAX - 1) + 1;

        let rows = sqlx::query(&format!(
            "SELECT id, body FROM {table} WHERE ($1::TEXT IS NULL OR id > $1) ORDER BY id LIMIT $2"
        ))
        .bind(continuation)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_missing_resource(e, database, collection))?;

        let has_more = rows.len() > page_size;
        let mut documents = Vec::with_capacity(page_size.min(rows.len()));
        let mut last_id = None;

        for row in rows.into_iter().take(page_size) {
            last_id = Some(row.try_get::<String, _>("id")?);
            documents.push(row.try_get::<Value, _>("body")?);
        }

        Ok(Page {
            documents,
            continuation: if has_more { last_id } else { None },
        })
    }
}
