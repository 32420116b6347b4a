//! Unified error handling for HTTP.
//!
//! Every failure reaching a handler is an [`AppError`]. The variants keep
//! three situations apart for the client:
//! - bad input (`Validation`, `PayloadTooLarge`, `Conflict`, `InvalidCredentials`,
//!   `NoFaceDetected`)
//! - a collaborator that failed (`Upstream`, `UpstreamTimeout`)
//! - a collaborator that answered with garbage (`Adapter`)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{AdapterError, DomainError};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("No face detected in image")]
    NoFaceDetected,

    // Classifier output
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    // External service errors
    #[error("{service} returned an error: {detail}")]
    Upstream {
        service: String,
        status: Option<u16>,
        detail: String,
    },

    #[error("{0} timed out")]
    UpstreamTimeout(String),

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::NoFaceDetected => "NO_FACE_DETECTED",
            AppError::Adapter(_) => "ADAPTER_ERROR",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::UpstreamTimeout(_) => "UPSTREAM_TIMEOUT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code.
    ///
    /// Upstream failures keep the collaborator's own error status; anything
    /// else from upstream (unreachable, 2xx with a bad body, 1xx/3xx)
    /// becomes 502.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NoFaceDetected => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Adapter(_) => StatusCode::BAD_GATEWAY,
            AppError::Upstream { status, .. } => status
                .filter(|code| (400..=599).contains(code))
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            #[cfg(feature = "database")]
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict(msg) => format!("{} already exists", msg),
            AppError::Adapter(e) => {
                tracing::error!("Classifier output rejected: {}", e);
                e.to_string()
            }
            AppError::Upstream {
                service,
                status,
                detail,
            } => {
                tracing::error!(service = %service, status = ?status, "Upstream error: {}", detail);
                format!("{} error: {}", service, detail)
            }
            AppError::UpstreamTimeout(service) => {
                tracing::error!("Upstream timeout: {}", service);
                format!("{} did not respond in time", service)
            }

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            detail: self.user_message(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Validation(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::Adapter(e) => AppError::Adapter(e),
            // A policy fed the wrong input is a wiring bug, not a client error
            DomainError::Scoring(msg) => AppError::Internal(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        AppError::PayloadTooLarge(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn upstream(service: impl Into<String>, status: Option<u16>, detail: impl Into<String>) -> Self {
        AppError::Upstream {
            service: service.into(),
            status,
            detail: detail.into(),
        }
    }

    pub fn upstream_timeout(service: impl Into<String>) -> Self {
        AppError::UpstreamTimeout(service.into())
    }
}
