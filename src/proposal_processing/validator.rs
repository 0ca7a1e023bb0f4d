use crate::models::message::content_to_text;
use crate::models::{EditRequest, Message, PreviousProposal, Role};
use serde_json::{Map, Value};
use thiserror::Error;

/// A rejected request body, naming every offending field at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub fields: Vec<String>,
}

impl ValidationError {
    pub fn not_json() -> Self {
        Self {
            message: "Request body is empty or not valid JSON.".to_string(),
            fields: Vec::new(),
        }
    }

    pub fn not_an_object() -> Self {
        Self {
            message: "Request body must be a JSON object.".to_string(),
            fields: Vec::new(),
        }
    }

    fn invalid_fields(problems: Vec<FieldProblem>) -> Self {
        let details = problems
            .iter()
            .map(|p| format!("'{}' {}", p.field, p.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            message: format!("Missing or invalid request parameters: {}", details),
            fields: problems.into_iter().map(|p| p.field).collect(),
        }
    }
}

struct FieldProblem {
    field: String,
    reason: String,
}

impl FieldProblem {
    fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: "is required".to_string(),
        }
    }

    fn mistyped(field: impl Into<String>, expected: &str, found: &Value) -> Self {
        Self {
            field: field.into(),
            reason: format!("must be {} (got {})", expected, json_type(found)),
        }
    }
}

/// Parses a raw request body and validates it.
pub fn parse_request(body: &[u8]) -> Result<EditRequest, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::not_json())?;
    validate_request(&value)
}

/// Checks presence and type of every request field and builds the typed
/// request. All problems are collected before returning.
pub fn validate_request(body: &Value) -> Result<EditRequest, ValidationError> {
    let object = body.as_object().ok_or_else(ValidationError::not_an_object)?;
    let mut problems = Vec::new();

    let current_file_content = required_str(object, "current_file_content", &mut problems);
    let latest_user_content = required_str(object, "latest_user_content", &mut problems);
    let history = required_history(object, &mut problems);
    let is_feedback = required(object, "is_feedback", &mut problems).and_then(|value| {
        let flag = value.as_bool();
        if flag.is_none() {
            problems.push(FieldProblem::mistyped("is_feedback", "a boolean", value));
        }
        flag
    });
    let previous_proposal =
        previous_proposal(object, is_feedback.unwrap_or(false), &mut problems);

    match (current_file_content, latest_user_content, history, is_feedback) {
        (Some(current_file_content), Some(latest_user_content), Some(history), Some(is_feedback))
            if problems.is_empty() =>
        {
            Ok(EditRequest {
                current_file_content,
                latest_user_content,
                history,
                is_feedback,
                previous_proposal,
            })
        }
        _ => Err(ValidationError::invalid_fields(problems)),
    }
}

fn required<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    problems: &mut Vec<FieldProblem>,
) -> Option<&'a Value> {
    let value = object.get(field);
    if value.is_none() {
        problems.push(FieldProblem::missing(field));
    }
    value
}

fn required_str(
    object: &Map<String, Value>,
    field: &str,
    problems: &mut Vec<FieldProblem>,
) -> Option<String> {
    let value = required(object, field, problems)?;
    match value.as_str() {
        Some(text) => Some(text.to_string()),
        None => {
            problems.push(FieldProblem::mistyped(field, "a string", value));
            None
        }
    }
}

fn required_history(
    object: &Map<String, Value>,
    problems: &mut Vec<FieldProblem>,
) -> Option<Vec<Message>> {
    let value = required(object, "history", problems)?;
    let Some(items) = value.as_array() else {
        problems.push(FieldProblem::mistyped("history", "an array", value));
        return None;
    };

    let before = problems.len();
    let history = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| history_message(index, item, problems))
        .collect();

    (problems.len() == before).then_some(history)
}

fn history_message(index: usize, item: &Value, problems: &mut Vec<FieldProblem>) -> Option<Message> {
    let field = format!("history[{}]", index);
    let Some(entry) = item.as_object() else {
        problems.push(FieldProblem::mistyped(field, "a message object", item));
        return None;
    };

    let role = entry.get("role").and_then(Value::as_str).and_then(Role::from_tag);
    let content = entry
        .get("content")
        .filter(|content| content.is_string() || content.is_object());

    match (role, content) {
        (Some(role), Some(content)) => Some(Message::new(role, content_to_text(content))),
        (None, _) => {
            problems.push(FieldProblem {
                field,
                reason: "must have a role of system, user or assistant".to_string(),
            });
            None
        }
        (_, None) => {
            problems.push(FieldProblem {
                field,
                reason: "must have string or object content".to_string(),
            });
            None
        }
    }
}

/// Only checked on feedback turns; elsewhere a non-object value is ignored.
fn previous_proposal(
    object: &Map<String, Value>,
    is_feedback: bool,
    problems: &mut Vec<FieldProblem>,
) -> Option<PreviousProposal> {
    match object.get("previous_proposal") {
        Some(Value::Object(map)) => Some(PreviousProposal::from(map.clone())),
        Some(Value::Null) | None => None,
        Some(other) => {
            if is_feedback {
                problems.push(FieldProblem::mistyped(
                    "previous_proposal",
                    "an object or null",
                    other,
                ));
            }
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
