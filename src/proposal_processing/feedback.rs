use crate::models::{EditRequest, PreviousProposal, ProposalStatus};

/// What the next proposal must be computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// The live document sent with the request.
    CurrentDocument,
    /// The full body of a prior `replace_all` proposal.
    PriorContent,
    /// A before/after reconstruction of a prior `success` proposal.
    PriorReplacement,
}

/// The final user turn handed to the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTurn {
    pub target: EditTarget,
    pub content: String,
}

/// Picks the editable target and frames the user turn around it.
///
/// `replace_all` and `success` proposals may not have been applied yet, so
/// feedback on them edits the proposal itself. `multiple_edits` (and anything
/// unrecognised) has no single body to rebuild, so feedback edits the current
/// document and leans on the proposal retained in history.
pub fn resolve_turn(request: &EditRequest) -> ResolvedTurn {
    if !request.is_feedback {
        return ResolvedTurn {
            target: EditTarget::CurrentDocument,
            content: instruction_turn(&request.current_file_content, &request.latest_user_content),
        };
    }

    let previous = request.previous_proposal.as_ref();
    match previous.and_then(prior_target) {
        Some((target, editable)) => ResolvedTurn {
            target,
            content: prior_feedback_turn(
                &editable,
                &request.latest_user_content,
                previous.and_then(PreviousProposal::status).unwrap_or_default(),
            ),
        },
        None => ResolvedTurn {
            target: EditTarget::CurrentDocument,
            content: document_feedback_turn(
                &request.current_file_content,
                &request.latest_user_content,
                previous.and_then(PreviousProposal::status),
            ),
        },
    }
}

fn prior_target(previous: &PreviousProposal) -> Option<(EditTarget, String)> {
    match previous.status().and_then(ProposalStatus::from_tag)? {
        ProposalStatus::ReplaceAll => previous
            .text_field("content")
            .map(|content| (EditTarget::PriorContent, content.to_string())),
        ProposalStatus::Success => Some((
            EditTarget::PriorReplacement,
            replacement_block(
                previous.text_field("old_string").unwrap_or_default(),
                previous.text_field("new_string").unwrap_or_default(),
            ),
        )),
        _ => None,
    }
}

fn replacement_block(old_string: &str, new_string: &str) -> String {
    format!(
        "Before:\n```\n{}\n```\nAfter:\n```\n{}\n```",
        old_string, new_string
    )
}

fn instruction_turn(document: &str, instruction: &str) -> String {
    format!(
        "
## Current file content:
---
{}
---
## User instruction: {}

Taking the conversation history into account, respond to the instruction above with a single JSON object.
",
        document, instruction
    )
}

fn prior_feedback_turn(editable: &str, feedback: &str, prior_status: &str) -> String {
    format!(
        "
## Previous proposal content (edit target):
---
{}
---
## Feedback on the proposal above: {}

Using the conversation history (especially the proposal JSON in the latest assistant message) and the feedback above, **revise the previous proposal content (edit target)**, not the current file, and respond with a new proposal as a single JSON object. (Original proposal type: {})
",
        editable, feedback, prior_status
    )
}

fn document_feedback_turn(document: &str, feedback: &str, prior_status: Option<&str>) -> String {
    let prior = match prior_status {
        Some(status) => format!(
            "{} proposal (see the latest assistant message in the conversation history for details)",
            status
        ),
        None => "see the latest assistant message in the conversation history".to_string(),
    };
    format!(
        "
## Current file content:
---
{}
---
## Previous proposal (from history): {}
## Feedback on the proposal above: {}

Using the conversation history (especially the latest proposal JSON) and the feedback above, **edit the current file content** and respond with a new proposal as a single JSON object.
",
        document, prior, feedback
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edit, EditProposal};

    const DOCUMENT: &str = "The live document body.";

    fn feedback_on(proposal: Option<EditProposal>) -> EditRequest {
        EditRequest::feedback(
            DOCUMENT,
            "make it shorter",
            Vec::new(),
            proposal.as_ref().map(PreviousProposal::from),
        )
    }

    #[test]
    fn fresh_instruction_targets_the_document() {
        let request = EditRequest::instruction(DOCUMENT, "fix typos", Vec::new());
        let turn = resolve_turn(&request);

        assert_eq!(turn.target, EditTarget::CurrentDocument);
        assert!(turn.content.contains(DOCUMENT));
        assert!(turn.content.contains("## User instruction: fix typos"));
    }

    #[test]
    fn feedback_on_replace_all_targets_prior_content() {
        let turn = resolve_turn(&feedback_on(Some(EditProposal::ReplaceAll {
            content: "X".to_string(),
        })));

        assert_eq!(turn.target, EditTarget::PriorContent);
        assert!(turn.content.contains("---\nX\n---"));
        assert!(!turn.content.contains(DOCUMENT));
        assert!(turn.content.contains("make it shorter"));
        assert!(turn.content.contains("(Original proposal type: replace_all)"));
    }

    #[test]
    fn feedback_on_success_shows_both_sides() {
        let turn = resolve_turn(&feedback_on(Some(EditProposal::Success {
            old_string: "a".to_string(),
            new_string: "b".to_string(),
        })));

        assert_eq!(turn.target, EditTarget::PriorReplacement);
        assert!(turn.content.contains("Before:\n```\na\n```"));
        assert!(turn.content.contains("After:\n```\nb\n```"));
        assert!(!turn.content.contains(DOCUMENT));
    }

    #[test]
    fn feedback_on_multiple_edits_targets_the_document() {
        let turn = resolve_turn(&feedback_on(Some(EditProposal::MultipleEdits {
            edits: vec![Edit::new("a", "b")],
        })));

        assert_eq!(turn.target, EditTarget::CurrentDocument);
        assert!(turn.content.contains(DOCUMENT));
        assert!(turn.content.contains("multiple_edits proposal"));
    }

    #[test]
    fn feedback_without_proposal_still_resolves() {
        let turn = resolve_turn(&feedback_on(None));

        assert_eq!(turn.target, EditTarget::CurrentDocument);
        assert!(turn.content.contains(DOCUMENT));
        assert!(turn.content.contains("make it shorter"));
    }

    #[test]
    fn unknown_status_and_missing_content_fall_back_to_document() {
        let mut map = serde_json::Map::new();
        map.insert("status".to_string(), "applied".into());
        let turn = resolve_turn(&EditRequest::feedback(
            DOCUMENT,
            "again",
            Vec::new(),
            Some(PreviousProposal::from(map)),
        ));
        assert_eq!(turn.target, EditTarget::CurrentDocument);

        let mut map = serde_json::Map::new();
        map.insert("status".to_string(), "replace_all".into());
        let turn = resolve_turn(&EditRequest::feedback(
            DOCUMENT,
            "again",
            Vec::new(),
            Some(PreviousProposal::from(map)),
        ));
        assert_eq!(turn.target, EditTarget::CurrentDocument);
        assert!(turn.content.contains(DOCUMENT));
    }
}
