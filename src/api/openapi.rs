//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{games, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GameShelf API",
        version = "0.1.0",
        description = "Personal video game library REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Games
        games::list_games,
        games::list_games_by_status,
        games::wishlist,
        games::currently_playing,
        games::check_game,
        games::add_game,
        games::update_game,
        games::remove_game,
    ),
    components(
        schemas(
            crate::models::library::GameStatus,
            crate::models::library::LibraryEntry,
            crate::models::library::NewLibraryEntry,
            crate::models::library::LibraryEntryUpdate,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "games", description = "Personal game library")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
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
