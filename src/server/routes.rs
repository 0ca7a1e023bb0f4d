use super::responses::{
    body_rejection_response, internal_error_response, method_not_allowed_response,
    not_configured_response, preflight_response, proposal_response, validation_response,
};
use super::{AppState, Backend};
use crate::proposal_processing::parse_request;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// `POST /edit`: validate, run the pipeline, reply with the proposal.
pub async fn edit(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let assistant = match state.backend() {
        Backend::Ready(assistant) => assistant.clone(),
        Backend::Unconfigured => {
            log::error!("Rejecting edit request: model client is not configured");
            return not_configured_response();
        }
    };

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            log::warn!("Rejected edit request body: {}", rejection.body_text());
            return body_rejection_response(rejection.status());
        }
    };

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(err) => {
            log::warn!("Invalid edit request: {} {:?}", err, err.fields);
            return validation_response(&err);
        }
    };

    match AssertUnwindSafe(assistant.propose(&request))
        .catch_unwind()
        .await
    {
        Ok(proposal) => proposal_response(StatusCode::OK, &proposal),
        Err(panic) => {
            log::error!(
                "Unexpected fault while handling edit request: {}",
                panic_detail(panic.as_ref())
            );
            internal_error_response()
        }
    }
}

/// `OPTIONS /edit`
pub async fn preflight() -> Response {
    preflight_response()
}

pub async fn method_not_allowed() -> Response {
    method_not_allowed_response()
}

fn panic_detail(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
