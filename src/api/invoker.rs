use super::errors::ApiError;
use crate::models::Message;
use async_trait::async_trait;

/// Performs one chat completion against a language model.
///
/// Implementations make a single attempt and return the raw reply text,
/// which may be empty or malformed.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<String, ApiError>;
}
