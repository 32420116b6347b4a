//! HTTP face classifier client.
//!
//! Talks to a DeepFace-style sidecar: the encoded image is POSTed as the
//! raw request body and the sidecar answers with
//! - 200 and `{dominant_emotion, emotion}` (or a list of them)
//! - 422 when no face could be located
//! - 400 when the image could not be decoded
//!
//! DeepFace reports per-emotion scores as percentages; the client converts
//! them to fractions so the adapter sees the same 0-1 scale as the text
//! classifier.

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use common::{AppError, AppResult, UpstreamConfig};
use domain::{AdapterError, SourceKind};

use super::{http_client, status_error, transport_error, FaceClassifier, FaceDetection, FACE_CLASSIFIER};

/// Face classifier reached over HTTP.
pub struct FaceClassifierClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    enforce_detection: bool,
}

impl FaceClassifierClient {
    /// Create a client from configuration.
    ///
    /// With `enforce_detection` off the sidecar guesses an emotion even when
    /// it cannot find a face.
    pub fn new(config: &UpstreamConfig, enforce_detection: bool) -> AppResult<Self> {
        Ok(Self {
            client: http_client(config, FACE_CLASSIFIER)?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            enforce_detection,
        })
    }
}

#[async_trait]
impl FaceClassifier for FaceClassifierClient {
    async fn classify(&self, image: Bytes) -> AppResult<FaceDetection> {
        debug!(bytes = image.len(), "Sending image to face classifier");

        let mut request = self
            .client
            .post(&self.endpoint)
            .query(&[("enforce_detection", self.enforce_detection)])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(FACE_CLASSIFIER, e))?;

        match response.status() {
            StatusCode::UNPROCESSABLE_ENTITY => return Ok(FaceDetection::NoFaceFound),
            StatusCode::BAD_REQUEST => return Err(AppError::validation("Invalid image format")),
            status if !status.is_success() => return Err(status_error(FACE_CLASSIFIER, response).await),
            _ => {}
        }

        let mut raw = response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                AppError::from(AdapterError::malformed(SourceKind::FaceClassifier, e.to_string()))
            } else {
                transport_error(FACE_CLASSIFIER, e)
            }
        })?;

        percent_to_fraction(&mut raw);
        Ok(FaceDetection::Detected(raw))
    }
}

/// Rewrite every `emotion` score map from 0-100 to 0-1, in place.
///
/// Results are rounded to six decimals so `0.9` becomes exactly `0.009`.
fn percent_to_fraction(raw: &mut Value) {
    let results: Vec<&mut Value> = match raw {
        Value::Array(items) => items.iter_mut().collect(),
        other => vec![other],
    };

    for result in results {
        if let Some(Value::Object(scores)) = result.get_mut("emotion") {
            for score in scores.values_mut() {
                if let Some(percent) = score.as_f64() {
                    let fraction = (percent / 100.0 * 1e6).round() / 1e6;
                    *score = Value::from(fraction);
                }
            }
        }
    }
}
