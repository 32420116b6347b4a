//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::auth_handler::{LoginRequest, MessageResponse, RegisterRequest};
use crate::handlers::health_handler::{HealthResponse, RootResponse, ServiceHealth, ServiceStatus};
use crate::handlers::stress_handler::{ChatRequest, ImageErrorResponse, ImageUpload, StressRequest};
use crate::services::{ChatResponse, ImageStressResponse, TextStressResponse};
use domain::StressLevel;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mental Wellness API",
        description = "Stress assessment from face images, free text and chat messages"
    ),
    paths(
        crate::handlers::health_handler::root,
        crate::handlers::health_handler::health_check,
        crate::handlers::stress_handler::analyze_emotion,
        crate::handlers::stress_handler::detect_stress,
        crate::handlers::stress_handler::chat,
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
            ImageUpload,
            ImageErrorResponse,
            ImageStressResponse,
            StressRequest,
            TextStressResponse,
            ChatRequest,
            ChatResponse,
            StressLevel,
            RegisterRequest,
            LoginRequest,
            MessageResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and dependency checks"),
        (name = "Stress", description = "Stress assessment endpoints"),
        (name = "Authentication", description = "User registration and login"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/health", "/analyze_emotion", "/detect-stress", "/chat", "/register", "/login"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
