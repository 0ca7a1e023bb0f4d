//! Scripted model invoker for tests and offline runs.
//!
//! Replies are consumed in order; every call records the messages it received.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{errors::ApiError, invoker::ModelInvoker};
use crate::models::Message;

#[derive(Debug, Default)]
pub struct ScriptedInvoker {
    replies: Mutex<VecDeque<Result<String, ApiError>>>,
    received: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// An invoker whose first call returns `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new().then_reply(text)
    }

    /// An invoker whose first call fails with `err`.
    pub fn failing(err: ApiError) -> Self {
        Self::new().then_fail(err)
    }

    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    pub fn then_fail(self, err: ApiError) -> Self {
        self.push(Err(err));
        self
    }

    /// Message sequences passed to `invoke`, oldest first.
    pub fn received(&self) -> Vec<Vec<Message>> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, reply: Result<String, ApiError>) {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply);
    }
}

#[async_trait]
impl ModelInvoker for ScriptedInvoker {
    async fn invoke(&self, messages: &[Message]) -> Result<String, ApiError> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(messages.to_vec());

        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Unknown("no scripted reply left".to_string())))
    }
}
