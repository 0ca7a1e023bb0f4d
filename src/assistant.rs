use crate::api::{ApiError, ModelInvoker};
use crate::models::{EditProposal, EditRequest, Message};
use crate::proposal_processing::{
    classify_response, compose_messages, normalize_history, resolve_turn, EditTarget,
};
use std::sync::Arc;

pub const RATE_LIMITED_MESSAGE: &str =
    "Too many requests are being processed right now. Please retry shortly.";
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Could not connect to the AI service. Check the network or retry shortly.";

/// Runs the proposal protocol for one request at a time.
///
/// Holds only a read-only handle to the model invoker, so a single instance
/// can serve any number of concurrent requests.
pub struct EditAssistant {
    invoker: Arc<dyn ModelInvoker>,
}

impl EditAssistant {
    pub fn new(invoker: Arc<dyn ModelInvoker>) -> Self {
        Self { invoker }
    }

    /// Normalizes history, resolves the editable target and composes the
    /// message sequence for the model.
    pub fn prepare(&self, request: &EditRequest) -> (Vec<Message>, EditTarget) {
        let history = normalize_history(&request.history);
        let turn = resolve_turn(request);
        log::debug!(
            "Composed turn (feedback: {}, target: {:?}):\n{}",
            request.is_feedback,
            turn.target,
            turn.content
        );
        (compose_messages(history, &turn), turn.target)
    }

    /// Produces exactly one proposal. Upstream failures become `error`
    /// proposals and malformed replies become `conversation` proposals.
    pub async fn propose(&self, request: &EditRequest) -> EditProposal {
        let (messages, _) = self.prepare(request);

        match self.invoker.invoke(&messages).await {
            Ok(raw) => {
                let proposal = classify_response(&raw);
                log::info!("Model proposed '{}'", proposal.status());
                proposal
            }
            Err(err) => upstream_failure(&err),
        }
    }
}

/// Translates an invoker failure into an `error` proposal for the caller.
pub fn upstream_failure(err: &ApiError) -> EditProposal {
    match err {
        ApiError::RateLimited(detail) => {
            log::warn!("Model service rate limit exceeded: {}", detail);
            EditProposal::error(RATE_LIMITED_MESSAGE)
        }
        ApiError::ConnectionFailed(detail) => {
            log::warn!("Could not reach the model service: {}", detail);
            EditProposal::error(CONNECTION_FAILED_MESSAGE)
        }
        ApiError::Upstream { code, body } => {
            log::error!("Model service error: status={}, body={}", code, body);
            EditProposal::error(format!(
                "The AI service returned an error (Code: {}).",
                code
            ))
        }
        ApiError::Unknown(detail) => {
            log::error!("Unexpected failure while calling the model service: {}", detail);
            EditProposal::error(format!(
                "An unexpected error occurred while processing the AI request: {}",
                detail
            ))
        }
    }
}
