//! Outbound collaborators: face classifier, text classifier and reply
//! generator.
//!
//! Each collaborator is a trait so the dispatcher can be driven by substitute
//! implementations in tests; the HTTP implementations live alongside.

mod face_classifier;
mod reply_generator;
mod text_classifier;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, Response};
use serde_json::Value;

use common::{AppError, AppResult, UpstreamConfig};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use face_classifier::FaceClassifierClient;
pub use reply_generator::ReplyGeneratorClient;
pub use text_classifier::TextClassifierClient;

/// Service names used in upstream errors and logs
pub const FACE_CLASSIFIER: &str = "face classifier";
pub const TEXT_CLASSIFIER: &str = "text classifier";
pub const REPLY_GENERATOR: &str = "reply generator";

/// Longest upstream error body echoed back to clients
const MAX_ERROR_DETAIL_CHARS: usize = 512;

/// Outcome of a face classification.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceDetection {
    /// A face was analysed; raw classifier JSON, not yet normalized
    Detected(Value),
    /// The classifier could not locate a face
    NoFaceFound,
}

/// Facial-expression classifier.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FaceClassifier: Send + Sync {
    /// Classify the face in an encoded image.
    ///
    /// Undecodable images are a validation error; a missing face is not an
    /// error but [`FaceDetection::NoFaceFound`].
    async fn classify(&self, image: Bytes) -> AppResult<FaceDetection>;
}

/// Text emotion classifier.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify `text`, returning the raw label/score JSON.
    async fn classify(&self, text: &str) -> AppResult<Value>;
}

/// Conversational reply generator.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn reply(&self, message: &str) -> AppResult<String>;
}

/// Build an HTTP client honouring the collaborator's timeout.
fn http_client(config: &UpstreamConfig, service: &str) -> AppResult<Client> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build {} client: {}", service, e)))
}

/// Map a failed send (connect, timeout, body read) to an upstream error.
fn transport_error(service: &str, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::upstream_timeout(service)
    } else {
        AppError::upstream(service, None, err.to_string())
    }
}

/// Turn a non-success response into an upstream error carrying its status.
async fn status_error(service: &str, response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let detail = if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.chars().take(MAX_ERROR_DETAIL_CHARS).collect()
    };
    AppError::upstream(service, Some(status), detail)
}
