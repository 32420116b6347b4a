//! Stress assessment handlers: face image, free text and chat.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};

use crate::config::MAX_IMAGE_BYTES;
use crate::extractors::ValidatedJson;
use crate::services::{ChatResponse, ImageStressResponse, TextStressResponse};
use crate::state::AppState;

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "file";

/// Free-text stress request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StressRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Text input is required"))]
    #[schema(example = "I feel overwhelmed and frustrated")]
    pub text: String,
}

/// Chat request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Message is required"))]
    #[schema(example = "I am so stressed about my exams")]
    pub message: String,
}

/// Multipart upload schema for the image endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUpload {
    /// Encoded image (JPEG, PNG, ...)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Image endpoint failure body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageErrorResponse {
    #[schema(example = "No face detected in image")]
    pub error: String,
}

/// Error wrapper for the image endpoint, which answers `{"error": ..}`
/// instead of the usual `{"detail", "code"}` body.
#[derive(Debug)]
pub struct ImageAnalysisError(pub AppError);

impl From<AppError> for ImageAnalysisError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ImageAnalysisError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let body = ImageErrorResponse {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Create stress routes, each with its trailing-slash variant.
pub fn stress_routes() -> Router<AppState> {
    let image = post(analyze_emotion).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES));

    Router::new()
        .route("/analyze_emotion", image.clone())
        .route("/analyze_emotion/", image)
        .route("/detect-stress", post(detect_stress))
        .route("/detect-stress/", post(detect_stress))
        .route("/chat", post(chat))
        .route("/chat/", post(chat))
}

/// Assess stress from a face image
#[utoipa::path(
    post,
    path = "/analyze_emotion",
    tag = "Stress",
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Dominant emotion and stress level", body = ImageStressResponse),
        (status = 400, description = "Missing or undecodable image", body = ImageErrorResponse),
        (status = 413, description = "Image larger than the upload limit", body = ImageErrorResponse),
        (status = 422, description = "No face detected", body = ImageErrorResponse),
        (status = 502, description = "Face classifier failed", body = ImageErrorResponse)
    )
)]
pub async fn analyze_emotion(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageStressResponse>, ImageAnalysisError> {
    let mut multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;
    let image = read_image_field(&mut multipart).await?;

    let result = state.dispatcher.assess_image(image).await?;
    Ok(Json(result))
}

/// Assess stress from free text
#[utoipa::path(
    post,
    path = "/detect-stress",
    tag = "Stress",
    request_body = StressRequest,
    responses(
        (status = 200, description = "Stress score and emotion distribution", body = TextStressResponse),
        (status = 400, description = "Missing text"),
        (status = 502, description = "Text classifier failed")
    )
)]
pub async fn detect_stress(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<StressRequest>,
) -> AppResult<Json<TextStressResponse>> {
    let result = state.dispatcher.assess_text(&payload.text).await?;
    Ok(Json(result))
}

/// Reply to a message and score it for stress keywords
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Stress",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply and keyword stress score", body = ChatResponse),
        (status = 400, description = "Missing message"),
        (status = 502, description = "Reply generator failed")
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let result = state.dispatcher.chat(&payload.message).await?;
    Ok(Json(result))
}

/// Read the image bytes from the `file` field, skipping any other fields.
async fn read_image_field(multipart: &mut Multipart) -> AppResult<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() == Some(IMAGE_FIELD) {
            return field
                .bytes()
                .await
                .map_err(multipart_error);
        }
    }

    Err(AppError::validation("Image file is required"))
}

/// Over-limit uploads surface as 413; any other multipart failure is bad input.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(err.body_text())
    } else {
        AppError::validation(err.body_text())
    }
}
