//! Hugging Face text emotion classifier client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use common::{AppError, AppResult, UpstreamConfig};
use domain::{AdapterError, SourceKind};

use super::{http_client, status_error, transport_error, TextClassifier, TEXT_CLASSIFIER};

/// Text classifier on the Hugging Face inference API.
pub struct TextClassifierClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl TextClassifierClient {
    /// Create a client from configuration. The API key is mandatory.
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::internal("Text classifier API key is not configured"))?;

        Ok(Self {
            client: http_client(config, TEXT_CLASSIFIER)?,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl TextClassifier for TextClassifierClient {
    async fn classify(&self, text: &str) -> AppResult<Value> {
        debug!(chars = text.chars().count(), "Sending text to classifier");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({ "inputs": text }))
            .send()
            .await
            .map_err(|e| transport_error(TEXT_CLASSIFIER, e))?;

        if !response.status().is_success() {
            return Err(status_error(TEXT_CLASSIFIER, response).await);
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                AppError::from(AdapterError::malformed(SourceKind::TextClassifier, e.to_string()))
            } else {
                transport_error(TEXT_CLASSIFIER, e)
            }
        })
    }
}
