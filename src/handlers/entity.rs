// src/handlers/entity.rs
//
// Handlers genéricos: o mesmo CRUD serve às cinco entidades e às duas
// versões. O que muda por versão (cache e operações expostas) vem do estado
// e do roteador.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::{cache_aside::CacheAside, versioning::ApiVersion};
use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
    models::Entity,
    services::EntityService,
};

pub struct EntityState<T: Entity> {
    pub service: EntityService<T>,
    pub version: ApiVersion,
    // Só a V2 lê através do cache
    pub cache: Option<CacheAside>,
}

impl<T: Entity> Clone for EntityState<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            version: self.version,
            cache: self.cache.clone(),
        }
    }
}

impl<T: Entity> EntityState<T> {
    pub fn new(service: EntityService<T>, version: ApiVersion, cache: Option<CacheAside>) -> Self {
        Self { service, version, cache }
    }

    fn location_of(&self, id: Uuid) -> String {
        format!("/api/{}/{}/{}", self.version.segment(), T::RESOURCE, id)
    }
}

// GET /api/v{n}/{Recurso}
pub async fn list<T: Entity>(
    State(state): State<EntityState<T>>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let items = match &state.cache {
        Some(cache) => {
            cache
                .read_through(T::LIST_CACHE_KEY, || state.service.list_all())
                .await
        }
        None => state.service.list_all().await,
    }
    .map_err(|app_err| app_err.to_api_error(&locale))?;

    // Lista vazia conta como "não encontrado"
    if items.is_empty() {
        return Err(AppError::NotFound.to_api_error(&locale));
    }

    Ok((StatusCode::OK, Json(items)))
}

// GET /api/v{n}/{Recurso}/{id}
//
// A chave do cache é fixa por entidade e NÃO inclui o id: enquanto a entrada
// viver, qualquer id recebe o valor cacheado da primeira consulta.
pub async fn get<T: Entity>(
    State(state): State<EntityState<T>>,
    locale: Locale,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    let item = match &state.cache {
        Some(cache) => {
            cache
                .read_through(T::ITEM_CACHE_KEY, || state.service.get_by_id(id))
                .await
        }
        None => state.service.get_by_id(id).await,
    }
    .map_err(|app_err| app_err.to_api_error(&locale))?;

    match item {
        Some(item) => Ok((StatusCode::OK, Json(item))),
        None => Err(AppError::NotFound.to_api_error(&locale)),
    }
}

// POST /api/v{n}/{Recurso}
pub async fn insert<T: Entity>(
    State(state): State<EntityState<T>>,
    locale: Locale,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(mut item) = payload.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    item.validate()
        .map_err(|e| AppError::ValidationError(e, T::FIELD_NAMES).to_api_error(&locale))?;

    // O id vem do chamador; se não vier, é gerado aqui e não no store.
    if item.id().is_nil() {
        item.set_id(Uuid::new_v4());
    }

    let created = state
        .service
        .insert(&item)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    tracing::info!("{} {} criado", T::RESOURCE, created.id());

    let location = state.location_of(created.id());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

// PUT /api/v{n}/{Recurso}/{id}
pub async fn update<T: Entity>(
    State(state): State<EntityState<T>>,
    locale: Locale,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|e| AppError::from(e).to_api_error(&locale))?;
    let Json(mut item) = payload.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    item.validate()
        .map_err(|e| AppError::ValidationError(e, T::FIELD_NAMES).to_api_error(&locale))?;

    // Substituição completa; o id da rota prevalece sobre o do corpo.
    item.set_id(id);

    let updated = state
        .service
        .update(id, &item)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    match updated {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::NotFound.to_api_error(&locale)),
    }
}

// DELETE /api/v{n}/{Recurso}/{id}
pub async fn delete<T: Entity>(
    State(state): State<EntityState<T>>,
    locale: Locale,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    // Confere a existência antes (sem cache); ausente não chega a tentar excluir.
    let existing = state
        .service
        .get_by_id(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    if existing.is_none() {
        return Err(AppError::NotFound.to_api_error(&locale));
    }

    state
        .service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    tracing::info!("{} {} excluído", T::RESOURCE, id);

    Ok(StatusCode::NO_CONTENT)
}
