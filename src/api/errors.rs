// src/api/errors.rs

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single model invocation.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("Connection to the model service failed: {0}")]
    ConnectionFailed(String),
    #[error("Model service returned HTTP {code}: {body}")]
    Upstream { code: u16, body: String },
    #[error("Unexpected model service failure: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Classifies a non-2xx reply from the model service.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimited(body)
        } else {
            ApiError::Upstream {
                code: status.as_u16(),
                body,
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            return ApiError::ConnectionFailed(err.to_string());
        }
        match err.status() {
            Some(status) => ApiError::from_status(status, err.to_string()),
            None => ApiError::Unknown(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Unknown(format!("Invalid JSON from model service: {}", err))
    }
}
