use serde::{Deserialize, Serialize};
use std::fmt;

/// One contiguous replacement inside a `multiple_edits` proposal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Edit {
    #[serde(default)]
    pub old_string: String,
    #[serde(default)]
    pub new_string: String,
}

impl Edit {
    pub fn new(old_string: impl Into<String>, new_string: impl Into<String>) -> Self {
        Self {
            old_string: old_string.into(),
            new_string: new_string.into(),
        }
    }
}

/// A structured description of how to change a document.
///
/// Serialized with the variant name as the `status` field, e.g.
/// `{"status":"replace_all","content":"..."}`. Fields the model omits default
/// to empty; consumers applying edits must check them before patching.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EditProposal {
    Success {
        #[serde(default)]
        old_string: String,
        #[serde(default)]
        new_string: String,
    },
    MultipleEdits {
        #[serde(default)]
        edits: Vec<Edit>,
    },
    ReplaceAll {
        #[serde(default)]
        content: String,
    },
    ClarificationNeeded {
        #[serde(default)]
        message: String,
    },
    Conversation {
        #[serde(default)]
        message: String,
    },
    Rejected {
        #[serde(default)]
        message: String,
    },
    /// Produced only by this service, never accepted from the model.
    Error { message: String },
}

impl EditProposal {
    pub fn error(message: impl Into<String>) -> Self {
        EditProposal::Error {
            message: message.into(),
        }
    }

    pub fn conversation(message: impl Into<String>) -> Self {
        EditProposal::Conversation {
            message: message.into(),
        }
    }

    pub fn status(&self) -> ProposalStatus {
        match self {
            EditProposal::Success { .. } => ProposalStatus::Success,
            EditProposal::MultipleEdits { .. } => ProposalStatus::MultipleEdits,
            EditProposal::ReplaceAll { .. } => ProposalStatus::ReplaceAll,
            EditProposal::ClarificationNeeded { .. } => ProposalStatus::ClarificationNeeded,
            EditProposal::Conversation { .. } => ProposalStatus::Conversation,
            EditProposal::Rejected { .. } => ProposalStatus::Rejected,
            EditProposal::Error { .. } => ProposalStatus::Error,
        }
    }

    /// The free-text message carried by message-only variants.
    pub fn message(&self) -> Option<&str> {
        match self {
            EditProposal::ClarificationNeeded { message }
            | EditProposal::Conversation { message }
            | EditProposal::Rejected { message }
            | EditProposal::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// The discriminant of an [`EditProposal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    Success,
    MultipleEdits,
    ReplaceAll,
    ClarificationNeeded,
    Conversation,
    Rejected,
    Error,
}

impl ProposalStatus {
    pub const MODEL_PRODUCIBLE: [ProposalStatus; 6] = [
        ProposalStatus::Success,
        ProposalStatus::MultipleEdits,
        ProposalStatus::ReplaceAll,
        ProposalStatus::ClarificationNeeded,
        ProposalStatus::Conversation,
        ProposalStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Success => "success",
            ProposalStatus::MultipleEdits => "multiple_edits",
            ProposalStatus::ReplaceAll => "replace_all",
            ProposalStatus::ClarificationNeeded => "clarification_needed",
            ProposalStatus::Conversation => "conversation",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Error => "error",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "success" => Some(ProposalStatus::Success),
            "multiple_edits" => Some(ProposalStatus::MultipleEdits),
            "replace_all" => Some(ProposalStatus::ReplaceAll),
            "clarification_needed" => Some(ProposalStatus::ClarificationNeeded),
            "conversation" => Some(ProposalStatus::Conversation),
            "rejected" => Some(ProposalStatus::Rejected),
            "error" => Some(ProposalStatus::Error),
            _ => None,
        }
    }

    pub fn is_model_producible(&self) -> bool {
        !matches!(self, ProposalStatus::Error)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
