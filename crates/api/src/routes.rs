//! Route configuration.

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{auth_routes, health_routes, stress_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
///
/// CORS is layered on by the caller since it depends on configuration that
/// can fail to parse.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Banner and health check
        .merge(health_routes())
        // Image, text and chat assessments
        .merge(stress_routes())
        // Registration and login
        .merge(auth_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
