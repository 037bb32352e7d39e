//! Manga catalog endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::manga::{CreateManga, Manga, MangaSearchQuery, UpdateManga},
    services::mangas::not_found,
    AppState,
};

use super::{
    auth::AuthenticatedUser,
    envelope::{Actor, ApiResponse},
    json_body, path_id,
};

const ENTITY: &str = "del manga";

/// List all mangas
#[utoipa::path(
    get,
    path = "/manga",
    tag = "manga",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Envelope whose `data` is every manga", body = Vec<Manga>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_mangas(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<Manga>>>> {
    let mangas = state.services.mangas.list().await?;
    Ok(Json(
        ApiResponse::success(mangas, "Mangas obtenidos exitosamente")
            .with_actor(Actor::User, claims.sub),
    ))
}

/// Get manga by ID
#[utoipa::path(
    get,
    path = "/manga/{id}",
    tag = "manga",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manga ID")),
    responses(
        (status = 200, description = "Envelope whose `data` is the manga", body = Manga),
        (status = 404, description = "Manga not found")
    )
)]
pub async fn get_manga(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<ApiResponse<Manga>>> {
    let id = path_id(path)?;
    let manga = state
        .services
        .mangas
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(manga, "Manga encontrado exitosamente")))
}

/// Create a manga
#[utoipa::path(
    post,
    path = "/manga",
    tag = "manga",
    security(("bearer_auth" = [])),
    request_body = CreateManga,
    responses(
        (status = 201, description = "Envelope whose `data` is the created manga", body = Manga),
        (status = 400, description = "Missing or malformed body")
    )
)]
pub async fn create_manga(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    payload: Result<Json<CreateManga>, JsonRejection>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<ApiResponse<Manga>>)> {
    let data = json_body(payload, ENTITY)?;

    let manga = state
        .services
        .mangas
        .create(&data)
        .await
        .map_err(|e| e.during("Error al crear el manga"))?;
    let location = format!("/api/v1/manga/{}", manga.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(
            ApiResponse::success(manga, "Manga creado exitosamente")
                .with_actor(Actor::CreatedBy, claims.sub),
        ),
    ))
}

/// Replace a manga
#[utoipa::path(
    put,
    path = "/manga/{id}",
    tag = "manga",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manga ID")),
    request_body = UpdateManga,
    responses(
        (status = 200, description = "Manga updated"),
        (status = 400, description = "Body ID does not match path ID"),
        (status = 404, description = "Manga not found")
    )
)]
pub async fn update_manga(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateManga>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = path_id(path)?;
    let data = json_body(payload, ENTITY)?;
    if data.id != Some(id) {
        return Err(AppError::BadRequest("El ID del manga no coincide".to_string()));
    }

    let manga = Manga {
        id,
        titulo: data.titulo,
        autor: data.autor,
        capitulos: data.capitulos,
    };
    state
        .services
        .mangas
        .update(&manga)
        .await
        .map_err(|e| e.during("Error al actualizar el manga"))?;

    Ok(Json(
        ApiResponse::done("Manga actualizado exitosamente").with_actor(Actor::UpdatedBy, claims.sub),
    ))
}

/// Delete a manga
#[utoipa::path(
    delete,
    path = "/manga/{id}",
    tag = "manga",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manga ID")),
    responses(
        (status = 200, description = "Manga deleted"),
        (status = 404, description = "Manga not found"),
        (status = 409, description = "Manga still has loans")
    )
)]
pub async fn delete_manga(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = path_id(path)?;
    let deleted = state
        .services
        .mangas
        .delete(id)
        .await
        .map_err(|e| e.during("Error al eliminar el manga"))?;
    if !deleted {
        return Err(not_found(id));
    }
    Ok(Json(
        ApiResponse::done("Manga eliminado exitosamente").with_actor(Actor::DeletedBy, claims.sub),
    ))
}

/// Search mangas by title substring
#[utoipa::path(
    get,
    path = "/manga/search",
    tag = "manga",
    security(("bearer_auth" = [])),
    params(MangaSearchQuery),
    responses(
        (status = 200, description = "Envelope whose `data` is the matching mangas", body = Vec<Manga>),
        (status = 400, description = "Empty search parameter")
    )
)]
pub async fn search_mangas(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<MangaSearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Manga>>>> {
    let titulo = query
        .titulo
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("El parámetro 'titulo' es requerido para la búsqueda".to_string())
        })?;

    let mangas = state.services.mangas.search_by_title(&titulo).await?;
    Ok(Json(
        ApiResponse::success(mangas, format!("Búsqueda completada para: '{}'", titulo))
            .with_actor(Actor::SearchedBy, claims.sub),
    ))
}
