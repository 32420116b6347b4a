//! Chat completions reply generator client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use common::{AppError, AppResult, UpstreamConfig};

use super::{http_client, status_error, transport_error, ReplyGenerator, REPLY_GENERATOR};

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Reply generator on an OpenAI-compatible chat completions endpoint.
pub struct ReplyGeneratorClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ReplyGeneratorClient {
    /// Create a client from configuration. The API key is mandatory.
    pub fn new(config: &UpstreamConfig, model: impl Into<String>) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::internal("Reply generator API key is not configured"))?;

        Ok(Self {
            client: http_client(config, REPLY_GENERATOR)?,
            endpoint: config.endpoint.clone(),
            api_key,
            model: model.into(),
        })
    }
}

#[async_trait]
impl ReplyGenerator for ReplyGeneratorClient {
    async fn reply(&self, message: &str) -> AppResult<String> {
        debug!(model = %self.model, "Requesting chat reply");

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": message }],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(REPLY_GENERATOR, e))?;

        if !response.status().is_success() {
            return Err(status_error(REPLY_GENERATOR, response).await);
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                AppError::upstream(REPLY_GENERATOR, None, format!("unreadable response: {}", e))
            } else {
                transport_error(REPLY_GENERATOR, e)
            }
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::upstream(REPLY_GENERATOR, None, "response contained no reply"))
    }
}
