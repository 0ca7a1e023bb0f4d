// src/api/client.rs

use super::{config, errors::ApiError, invoker::ModelInvoker};
use crate::errors::AppError;
use crate::models::Message;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// API client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiApi {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiApi {
    /// Creates a new `OpenAiApi` instance.
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
            model: model.into(),
            temperature,
        }
    }

    /// Creates a client with the credential taken from the process environment.
    pub fn from_env(
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Result<Self, AppError> {
        let api_key = std::env::var(config::API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AppError::MissingApiKey)?;
        Ok(Self::new(api_key, base_url, model, temperature))
    }

    /// Sends a chat completion request and returns the first choice's content.
    async fn send_request(&self, messages: &[Message]) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": messages,
                "temperature": self.temperature,
                "response_format": {"type": "json_object"},
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, error_text));
        }

        let raw_response = response.text().await?;
        let json_response: Value = serde_json::from_str(&raw_response)?;
        extract_content(&json_response)
    }
}

#[async_trait]
impl ModelInvoker for OpenAiApi {
    async fn invoke(&self, messages: &[Message]) -> Result<String, ApiError> {
        log::debug!("Calling {} with {} messages", self.model, messages.len());
        self.send_request(messages).await
    }
}

/// Pulls the reply text out of a chat completions body. A null or missing
/// content is returned as empty text and classified downstream.
pub(crate) fn extract_content(json_response: &Value) -> Result<String, ApiError> {
    if let Some(error) = json_response.get("error") {
        return Err(ApiError::Unknown(error.to_string()));
    }

    let response = json_response["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    log::debug!("Model response: {}", response);
    Ok(response)
}
