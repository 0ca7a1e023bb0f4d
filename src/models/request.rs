use super::{EditProposal, Message};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The prior proposal as echoed back by the caller on a feedback turn.
///
/// Kept untyped: the caller may send any status, including ones this service
/// does not know, and the resolver must still fall back sensibly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct PreviousProposal(Map<String, Value>);

impl PreviousProposal {
    pub fn status(&self) -> Option<&str> {
        self.text_field("status")
    }

    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for PreviousProposal {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<&EditProposal> for PreviousProposal {
    fn from(proposal: &EditProposal) -> Self {
        match serde_json::to_value(proposal) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }
}

/// One edit request, constructed per call and dropped after the reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EditRequest {
    pub current_file_content: String,
    pub latest_user_content: String,
    pub history: Vec<Message>,
    pub is_feedback: bool,
    #[serde(default)]
    pub previous_proposal: Option<PreviousProposal>,
}

impl EditRequest {
    /// A fresh instruction against the current document.
    pub fn instruction(
        current_file_content: impl Into<String>,
        latest_user_content: impl Into<String>,
        history: Vec<Message>,
    ) -> Self {
        Self {
            current_file_content: current_file_content.into(),
            latest_user_content: latest_user_content.into(),
            history,
            is_feedback: false,
            previous_proposal: None,
        }
    }

    /// Feedback on a previously returned proposal.
    pub fn feedback(
        current_file_content: impl Into<String>,
        latest_user_content: impl Into<String>,
        history: Vec<Message>,
        previous_proposal: Option<PreviousProposal>,
    ) -> Self {
        Self {
            current_file_content: current_file_content.into(),
            latest_user_content: latest_user_content.into(),
            history,
            is_feedback: true,
            previous_proposal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_proposal_reads_fields_from_typed_proposal() {
        let proposal = EditProposal::ReplaceAll {
            content: "new body".to_string(),
        };
        let previous = PreviousProposal::from(&proposal);

        assert_eq!(previous.status(), Some("replace_all"));
        assert_eq!(previous.text_field("content"), Some("new body"));
        assert_eq!(previous.text_field("old_string"), None);
    }
}
