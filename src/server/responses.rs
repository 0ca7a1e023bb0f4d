use crate::models::EditProposal;
use crate::proposal_processing::ValidationError;
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Backend configuration error: the model client is not configured.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected internal server error occurred.";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body exceeds the configured size limit.";
pub const BODY_UNREADABLE_MESSAGE: &str = "Request body could not be read.";

const ALLOW_METHODS: &str = "POST, OPTIONS";

/// Body of a 400 reply: an `error` proposal plus the offending fields.
#[derive(Serialize)]
struct ValidationBody<'a> {
    status: &'static str,
    message: &'a str,
    fields: &'a [String],
}

pub fn proposal_response(status: StatusCode, proposal: &EditProposal) -> Response {
    json_response(status, proposal)
}

pub fn validation_response(err: &ValidationError) -> Response {
    json_response(
        StatusCode::BAD_REQUEST,
        &ValidationBody {
            status: "error",
            message: &err.message,
            fields: &err.fields,
        },
    )
}

pub fn not_configured_response() -> Response {
    proposal_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &EditProposal::error(NOT_CONFIGURED_MESSAGE),
    )
}

pub fn internal_error_response() -> Response {
    proposal_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &EditProposal::error(INTERNAL_ERROR_MESSAGE),
    )
}

/// The body never reached validation. Keeps the extractor's status code.
pub fn body_rejection_response(status: StatusCode) -> Response {
    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        BODY_TOO_LARGE_MESSAGE
    } else {
        BODY_UNREADABLE_MESSAGE
    };
    proposal_response(status, &EditProposal::error(message))
}

pub fn preflight_response() -> Response {
    let mut response = empty_response(StatusCode::NO_CONTENT, Body::empty());
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("3600"));
    response
}

pub fn method_not_allowed_response() -> Response {
    let mut response = empty_response(
        StatusCode::METHOD_NOT_ALLOWED,
        Body::from("Method Not Allowed"),
    );
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(ALLOW_METHODS));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            let mut response = empty_response(status, Body::from(bytes));
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            );
            response
        }
        Err(e) => {
            log::error!("Failed to serialize response body: {}", e);
            empty_response(StatusCode::INTERNAL_SERVER_ERROR, Body::empty())
        }
    }
}

/// Every reply on the route carries the permissive CORS origin.
fn empty_response(status: StatusCode, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
