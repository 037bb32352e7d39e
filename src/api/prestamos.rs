//! Loan (préstamo) endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::prestamo::{
        CreatePrestamo, DateRangeQuery, Prestamo, PrestamoSearchQuery, UpdatePrestamo,
    },
    services::prestamos::not_found,
    AppState,
};

use super::{
    auth::AuthenticatedUser,
    envelope::{Actor, ApiResponse},
    json_body, path_id,
};

const ENTITY: &str = "del préstamo";

/// List all loans
#[utoipa::path(
    get,
    path = "/prestamo",
    tag = "prestamo",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Envelope whose `data` is every loan", body = Vec<Prestamo>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_prestamos(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<Prestamo>>>> {
    let prestamos = state.services.prestamos.list().await?;
    Ok(Json(
        ApiResponse::success(prestamos, "Préstamos obtenidos exitosamente")
            .with_actor(Actor::User, claims.sub),
    ))
}

/// Get loan by ID
#[utoipa::path(
    get,
    path = "/prestamo/{id}",
    tag = "prestamo",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Envelope whose `data` is the loan", body = Prestamo),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_prestamo(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<ApiResponse<Prestamo>>> {
    let id = path_id(path)?;
    let prestamo = state
        .services
        .prestamos
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(prestamo, "Préstamo encontrado exitosamente")))
}

/// Create a loan
#[utoipa::path(
    post,
    path = "/prestamo",
    tag = "prestamo",
    security(("bearer_auth" = [])),
    request_body = CreatePrestamo,
    responses(
        (status = 201, description = "Envelope whose `data` is the created loan", body = Prestamo),
        (status = 400, description = "Missing body, empty client name or unknown manga")
    )
)]
pub async fn create_prestamo(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    payload: Result<Json<CreatePrestamo>, JsonRejection>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<ApiResponse<Prestamo>>)> {
    let data = json_body(payload, ENTITY)?;
    data.validate()?;

    let prestamo = state
        .services
        .prestamos
        .create(&data)
        .await
        .map_err(|e| e.during("Error al crear el préstamo"))?;
    let location = format!("/api/v1/prestamo/{}", prestamo.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(
            ApiResponse::success(prestamo, "Préstamo creado exitosamente")
                .with_actor(Actor::CreatedBy, claims.sub),
        ),
    ))
}

/// Replace a loan
#[utoipa::path(
    put,
    path = "/prestamo/{id}",
    tag = "prestamo",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    request_body = UpdatePrestamo,
    responses(
        (status = 200, description = "Loan updated"),
        (status = 400, description = "Body ID does not match path ID, or invalid fields"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn update_prestamo(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdatePrestamo>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = path_id(path)?;
    let data = json_body(payload, ENTITY)?;
    if data.id != Some(id) {
        return Err(AppError::BadRequest("El ID del préstamo no coincide".to_string()));
    }
    data.validate()?;

    let prestamo = Prestamo {
        id,
        nombre_cliente: data.nombre_cliente,
        fecha_prestamo: data.fecha_prestamo,
        manga_id: data.manga_id,
    };
    state
        .services
        .prestamos
        .update(&prestamo)
        .await
        .map_err(|e| e.during("Error al actualizar el préstamo"))?;

    Ok(Json(
        ApiResponse::done("Préstamo actualizado exitosamente")
            .with_actor(Actor::UpdatedBy, claims.sub),
    ))
}

/// Delete a loan
#[utoipa::path(
    delete,
    path = "/prestamo/{id}",
    tag = "prestamo",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan deleted"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_prestamo(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = path_id(path)?;
    let deleted = state
        .services
        .prestamos
        .delete(id)
        .await
        .map_err(|e| e.during("Error al eliminar el préstamo"))?;
    if !deleted {
        return Err(not_found(id));
    }
    Ok(Json(
        ApiResponse::done("Préstamo eliminado exitosamente")
            .with_actor(Actor::DeletedBy, claims.sub),
    ))
}

/// Search loans by client name substring
#[utoipa::path(
    get,
    path = "/prestamo/search",
    tag = "prestamo",
    security(("bearer_auth" = [])),
    params(PrestamoSearchQuery),
    responses(
        (status = 200, description = "Envelope whose `data` is the matching loans", body = Vec<Prestamo>),
        (status = 400, description = "Empty search parameter")
    )
)]
pub async fn search_prestamos(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PrestamoSearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Prestamo>>>> {
    let cliente = query
        .cliente
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("El parámetro 'cliente' es requerido para la búsqueda".to_string())
        })?;

    let prestamos = state.services.prestamos.search_by_cliente(&cliente).await?;
    Ok(Json(
        ApiResponse::success(prestamos, format!("Búsqueda completada para cliente: '{}'", cliente))
            .with_actor(Actor::SearchedBy, claims.sub),
    ))
}

/// List loans of a manga
#[utoipa::path(
    get,
    path = "/prestamo/manga/{manga_id}",
    tag = "prestamo",
    security(("bearer_auth" = [])),
    params(("manga_id" = i32, Path, description = "Manga ID")),
    responses(
        (status = 200, description = "Envelope whose `data` is the manga's loans", body = Vec<Prestamo>)
    )
)]
pub async fn list_prestamos_by_manga(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<ApiResponse<Vec<Prestamo>>>> {
    let manga_id = path_id(path)?;
    let prestamos = state.services.prestamos.list_by_manga(manga_id).await?;
    Ok(Json(
        ApiResponse::success(
            prestamos,
            format!("Préstamos del manga ID {} obtenidos exitosamente", manga_id),
        )
        .with_actor(Actor::User, claims.sub),
    ))
}

/// List loans dated within an inclusive range
#[utoipa::path(
    get,
    path = "/prestamo/fecha",
    tag = "prestamo",
    security(("bearer_auth" = [])),
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Envelope whose `data` is the loans in range", body = Vec<Prestamo>),
        (status = 400, description = "Missing or malformed dates")
    )
)]
pub async fn list_prestamos_by_date_range(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<Prestamo>>>> {
    let Query(range) = query.map_err(|e| {
        AppError::BadRequest(format!("Parámetros de fecha inválidos: {}", e.body_text()))
    })?;
    let (Some(inicio), Some(fin)) = (range.inicio, range.fin) else {
        return Err(AppError::BadRequest(
            "Los parámetros 'inicio' y 'fin' son requeridos".to_string(),
        ));
    };

    let prestamos = state.services.prestamos.list_by_date_range(inicio, fin).await?;
    Ok(Json(
        ApiResponse::success(
            prestamos,
            format!("Préstamos entre {} y {} obtenidos exitosamente", inicio, fin),
        )
        .with_actor(Actor::SearchedBy, claims.sub),
    ))
}
