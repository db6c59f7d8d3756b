// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use administrativo::{
    cache::{CacheEntryOptions, DistributedCache, InMemoryCache, NoOpCache},
    config::AppState,
    db::{DocumentStore, InMemoryDocumentStore, Page, StoreError},
    router::build_router,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

/// Store em memória que conta as chamadas recebidas.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryDocumentStore,
    pub reads: AtomicUsize,
    pub queries: AtomicUsize,
    pub creates: AtomicUsize,
    pub replaces: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl CountingStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn ensure_database(&self, database: &str) -> Result<(), StoreError> {
        self.inner.ensure_database(database).await
    }

    async fn ensure_collection(&self, database: &str, collection: &str) -> Result<(), StoreError> {
        self.inner.ensure_collection(database, collection).await
    }

    async fn read_document(&self, database: &str, collection: &str, id: &str) -> Result<Value, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_document(database, collection, id).await
    }

    async fn create_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create_document(database, collection, id, body).await
    }

    async fn replace_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        self.replaces.fetch_add(1, Ordering::SeqCst);
        self.inner.replace_document(database, collection, id, body).await
    }

    async fn delete_document(&self, database: &str, collection: &str, id: &str) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_document(database, collection, id).await
    }

    async fn query_documents(
        &self,
        database: &str,
        collection: &str,
        page_size: usize,
        continuation: Option<String>,
    ) -> Result<Page, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query_documents(database, collection, page_size, continuation).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<CountingStore>,
}

pub fn app_with_cache(cache: Arc<dyn DistributedCache>) -> TestApp {
    let store = Arc::new(CountingStore::default());
    // Página pequena para exercitar a paginação nas listagens.
    let state = AppState::from_parts(store.clone(), cache, "administrativo", 2, CacheEntryOptions::default());
    TestApp {
        router: build_router(&state),
        store,
    }
}

pub fn app() -> TestApp {
    app_with_cache(Arc::new(InMemoryCache::default()))
}

pub fn app_without_cache() -> TestApp {
    app_with_cache(Arc::new(NoOpCache))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }
}

pub const TIPO_EMPRESA_ID: &str = "2f7f0d55-0a56-4a53-9d3b-6a6c4f8f8e11";

pub fn furnas() -> Value {
    serde_json::json!({
        "id": "6d0f4c1e-3b2a-4f7e-9a51-1c2d3e4f5a6b",
        "razaoSocial": "Furnas Centrais Elétricas S.A",
        "nomeFantasia": "Furnas",
        "cnpj": "67493040000193",
        "ativo": true,
        "idTipoEmpresa": TIPO_EMPRESA_ID
    })
}

pub fn company(id: &str, trade_name: &str) -> Value {
    serde_json::json!({
        "id": id,
        "razaoSocial": format!("{trade_name} S.A."),
        "nomeFantasia": trade_name,
        "cnpj": "00.000.000/0001-00",
        "ativo": true,
        "idTipoEmpresa": TIPO_EMPRESA_ID
    })
}

// Usuário completo, com data de nascimento no formato data e hora sem fuso.
pub fn user(id: &str) -> Value {
    serde_json::json!({
        "id": id,
        "nome": "Oscar Niemeyer",
        "cpf": "52998224725",
        "dataNascimento": "1907-12-15T00:00:00",
        "sexo": "M",
        "email": "oscar@example.com",
        "telefones": [
            { "ddi": "55", "ddd": "21", "numero": "25551234" }
        ],
        "enderecos": [{
            "logradouro": "Estrada da Canoa, 2310",
            "complemento": "Casa das Canoas",
            "cep": "22610210",
            "bairro": "São Conrado",
            "cidade": "Rio de Janeiro",
            "estado": "RJ",
            "pais": "Brasil"
        }]
    })
}
