//! CORS layer built from the configured origin list.

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use common::ConfigError;

/// Origin entry that opens the API to every origin
const ANY_ORIGIN: &str = "*";

/// Build the CORS layer.
///
/// Listed origins may send credentials. A `*` entry allows any origin, and
/// credentials are then disabled since browsers reject that combination.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if origins.iter().any(|origin| origin == ANY_ORIGIN) {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                var: "ALLOWED_ORIGINS".to_string(),
                value: origin.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true))
}
