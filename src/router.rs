// src/router.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::AppState,
    handlers::{entity, operations, ApiVersion, CacheAside, EntityState, Operation},
    middleware::api_version::report_api_versions,
    models::Entity,
    services::EntityService,
};

// Monta as rotas de uma entidade numa versão, expondo só as operações
// que a tabela de capacidades permite. O resto responde 405.
fn entity_routes<T: Entity>(app_state: &AppState, version: ApiVersion, service: EntityService<T>) -> Router {
    let cache = version
        .uses_cache()
        .then(|| CacheAside::new(app_state.cache.clone(), app_state.cache_options));
    let state = EntityState::new(service, version, cache);

    let mut collection: MethodRouter<EntityState<T>> = MethodRouter::new();
    let mut item: MethodRouter<EntityState<T>> = MethodRouter::new();

    for operation in operations(T::KIND, version) {
        match operation {
            Operation::List => collection = collection.get(entity::list::<T>),
            Operation::Insert => collection = collection.post(entity::insert::<T>),
            Operation::Get => item = item.get(entity::get::<T>),
            Operation::Update => item = item.put(entity::update::<T>),
            Operation::Delete => item = item.delete(entity::delete::<T>),
        }
    }

    let base = format!("/api/{}/{}", version.segment(), T::RESOURCE);

    Router::new()
        .route(&base, collection.clone())
        .route(&format!("{base}/"), collection)
        .route(&format!("{base}/{{id}}"), item)
        .with_state(state)
        .layer(axum_middleware::from_fn_with_state(version, report_api_versions))
}

pub fn build_router(app_state: &AppState) -> Router {
    let services = &app_state.services;

    let mut app = Router::new().route("/api/health", get(|| async { "OK" }));

    for version in ApiVersion::ALL {
        app = app
            .merge(entity_routes(app_state, version, services.company.clone()))
            .merge(entity_routes(app_state, version, services.company_type.clone()))
            .merge(entity_routes(app_state, version, services.profile.clone()))
            .merge(entity_routes(app_state, version, services.user.clone()))
            .merge(entity_routes(app_state, version, services.profile_user.clone()));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
