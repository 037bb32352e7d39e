//! API handlers for Mangateca REST endpoints

pub mod auth;
pub mod envelope;
pub mod health;
pub mod mangas;
pub mod openapi;
pub mod prestamos;
#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Both resource groups sit behind the same bearer guard
    let guard = middleware::from_fn_with_state(state.clone(), auth::require_bearer);

    let manga_routes = Router::new()
        .route("/manga", get(mangas::list_mangas).post(mangas::create_manga))
        .route("/manga/search", get(mangas::search_mangas))
        .route(
            "/manga/:id",
            get(mangas::get_manga)
                .put(mangas::update_manga)
                .delete(mangas::delete_manga),
        )
        .route_layer(guard.clone());

    let prestamo_routes = Router::new()
        .route(
            "/prestamo",
            get(prestamos::list_prestamos).post(prestamos::create_prestamo),
        )
        .route("/prestamo/search", get(prestamos::search_prestamos))
        .route("/prestamo/fecha", get(prestamos::list_prestamos_by_date_range))
        .route(
            "/prestamo/manga/:manga_id",
            get(prestamos::list_prestamos_by_manga),
        )
        .route(
            "/prestamo/:id",
            get(prestamos::get_prestamo)
                .put(prestamos::update_prestamo)
                .delete(prestamos::delete_prestamo),
        )
        .route_layer(guard);

    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .merge(manga_routes)
        .merge(prestamo_routes)
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Unwrap a numeric path segment, keeping rejections inside the envelope
pub(crate) fn path_id(path: Result<Path<i32>, PathRejection>) -> AppResult<i32> {
    path.map(|Path(id)| id).map_err(|rejection| {
        AppError::BadRequest(format!("Parámetro de ruta inválido: {}", rejection.body_text()))
    })
}

/// Unwrap a JSON body. `entity` names the resource in the messages, e.g. "del manga".
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>, entity: &str) -> AppResult<T> {
    match payload {
        Ok(Json(data)) => Ok(data),
        Err(rejection @ (JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_))) => {
            Err(AppError::BadRequest(format!(
                "Los datos {} son inválidos: {}",
                entity,
                rejection.body_text()
            )))
        }
        Err(_) => Err(AppError::BadRequest(format!("Los datos {} son requeridos", entity))),
    }
}
