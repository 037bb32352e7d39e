//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, mangas, prestamos};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mangateca API",
        version = "1.0.0",
        description = "Manga catalog and loan tracking REST API. Every resource response is wrapped in `{success, data?, message, error?}`."
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Manga
        mangas::list_mangas,
        mangas::get_manga,
        mangas::create_manga,
        mangas::update_manga,
        mangas::delete_manga,
        mangas::search_mangas,
        // Prestamo
        prestamos::list_prestamos,
        prestamos::get_prestamo,
        prestamos::create_prestamo,
        prestamos::update_prestamo,
        prestamos::delete_prestamo,
        prestamos::search_prestamos,
        prestamos::list_prestamos_by_manga,
        prestamos::list_prestamos_by_date_range,
    ),
    components(
        schemas(
            crate::models::manga::Manga,
            crate::models::manga::CreateManga,
            crate::models::manga::UpdateManga,
            crate::models::prestamo::Prestamo,
            crate::models::prestamo::CreatePrestamo,
            crate::models::prestamo::UpdatePrestamo,
            health::HealthResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "manga", description = "Manga catalog"),
        (name = "prestamo", description = "Manga loans")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
