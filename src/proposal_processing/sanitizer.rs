use crate::models::{EditProposal, ProposalStatus};
use serde::Deserialize;
use serde_json::Value;

pub const EMPTY_RESPONSE_MESSAGE: &str = "The AI service returned an empty response.";

const FENCE: &str = "```";

/// Removes a code fence wrapped around the whole text, with or without a
/// language tag. A missing closing fence is tolerated; unfenced text is
/// returned trimmed.
///
/// A word after the opening backticks is only a tag when a line break, the
/// end of the text or a JSON body follows it; otherwise it is content.
pub fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let opening = trimmed.len() - trimmed.trim_start_matches('`').len();
    if opening < FENCE.len() {
        return trimmed;
    }

    let after_ticks = &trimmed[opening..];
    let tag_len = after_ticks
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(after_ticks.len());
    let rest = &after_ticks[tag_len..];
    let body = if is_tag_terminator(rest) {
        rest
    } else {
        after_ticks
    }
    .trim_end();

    let closing = body.len() - body.trim_end_matches('`').len();
    let body = if closing >= FENCE.len() {
        &body[..body.len() - closing]
    } else {
        body
    };
    body.trim()
}

fn is_tag_terminator(rest: &str) -> bool {
    rest.starts_with(&['\n', '\r'][..])
        || rest.trim_start_matches(&[' ', '\t'][..]).is_empty()
        || rest.trim_start().starts_with(&['{', '['][..])
}

/// Turns the model's raw reply into a proposal.
///
/// Anything that is not a JSON object with a known model status becomes a
/// `conversation` carrying the reply text, so the caller always sees what the
/// model said. An empty reply is an `error`.
pub fn classify_response(raw: &str) -> EditProposal {
    if raw.trim().is_empty() {
        log::error!("Model returned an empty response");
        return EditProposal::error(EMPTY_RESPONSE_MESSAGE);
    }

    let body = strip_fence(raw);
    let mut value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Model response is not JSON ({}): {}", e, body);
            return unparsed(body);
        }
    };

    let status = value
        .get("status")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|status| !status.is_empty());
    let Some(status) = status.map(str::to_string) else {
        log::warn!("Model response has no status or is not an object: {}", body);
        return unparsed(body);
    };

    match ProposalStatus::from_tag(&status) {
        Some(known) if known.is_model_producible() => {}
        _ => {
            log::warn!("Model response has unsupported status '{}'", status);
            return unparsed(body);
        }
    }

    value["status"] = Value::String(status.clone());
    match EditProposal::deserialize(&value) {
        Ok(proposal) => proposal,
        Err(e) => {
            log::warn!("Model response has malformed '{}' fields ({})", status, e);
            unparsed(body)
        }
    }
}

fn unparsed(body: &str) -> EditProposal {
    EditProposal::conversation(format!(
        "Could not parse the AI response:\n```\n{}\n```",
        body
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Edit;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_tagged_fence() {
        assert_eq!(strip_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fence("  ```JSON\n{\"a\":1}\n```  \n"), "{\"a\":1}");
    }

    #[test]
    fn strips_bare_and_inline_fences() {
        assert_eq!(strip_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fence("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_fence("````\n{\"a\":1}\n````"), "{\"a\":1}");
    }

    #[test]
    fn leading_word_of_fenced_prose_is_kept() {
        assert_eq!(
            strip_fence("```Sorry, I cannot help with that```"),
            "Sorry, I cannot help with that"
        );
        assert_eq!(
            strip_fence("```Hello world\nsecond line```"),
            "Hello world\nsecond line"
        );
        assert_eq!(strip_fence("```json {\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn fenced_prose_is_shown_verbatim() {
        let proposal = classify_response("```Sorry, I cannot help with that```");

        assert_eq!(
            proposal.message(),
            Some("Could not parse the AI response:\n```\nSorry, I cannot help with that\n```")
        );
    }

    #[test]
    fn tolerates_missing_closing_fence() {
        assert_eq!(strip_fence("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_fence("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(
            strip_fence("Here you go: ```json\n{}\n```"),
            "Here you go: ```json\n{}\n```"
        );
    }

    #[test]
    fn fenced_success_is_classified() {
        let proposal = classify_response(
            "```json\n{\"status\":\"success\",\"old_string\":\"a\",\"new_string\":\"b\"}\n```",
        );

        assert_eq!(
            proposal,
            EditProposal::Success {
                old_string: "a".to_string(),
                new_string: "b".to_string(),
            }
        );
    }

    #[test]
    fn plain_json_variants_are_classified() {
        assert_eq!(
            classify_response(
                "{\"status\":\"multiple_edits\",\"edits\":[{\"old_string\":\"x\",\"new_string\":\"y\"}]}"
            ),
            EditProposal::MultipleEdits {
                edits: vec![Edit::new("x", "y")],
            }
        );
        assert_eq!(
            classify_response("{\"status\":\"rejected\",\"message\":\"no\"}"),
            EditProposal::Rejected {
                message: "no".to_string(),
            }
        );
    }

    #[test]
    fn prose_falls_back_to_conversation() {
        let raw = "Sure, here's my answer: not JSON at all";
        let proposal = classify_response(raw);

        assert_eq!(proposal.status(), ProposalStatus::Conversation);
        assert!(proposal.message().unwrap().contains(raw));
    }

    #[test]
    fn json_without_status_falls_back_to_conversation() {
        let proposal = classify_response("{\"foo\":\"bar\"}");

        assert_eq!(proposal.status(), ProposalStatus::Conversation);
        assert!(proposal.message().unwrap().contains("{\"foo\":\"bar\"}"));
    }

    #[test]
    fn non_object_and_blank_status_fall_back() {
        assert_eq!(classify_response("[1,2]").status(), ProposalStatus::Conversation);
        assert_eq!(
            classify_response("{\"status\":\"  \"}").status(),
            ProposalStatus::Conversation
        );
        assert_eq!(
            classify_response("{\"status\":5}").status(),
            ProposalStatus::Conversation
        );
    }

    #[test]
    fn unknown_or_internal_status_falls_back() {
        assert_eq!(
            classify_response("{\"status\":\"applied\"}").status(),
            ProposalStatus::Conversation
        );
        assert_eq!(
            classify_response("{\"status\":\"error\",\"message\":\"x\"}").status(),
            ProposalStatus::Conversation
        );
    }

    #[test]
    fn padded_status_is_accepted() {
        assert_eq!(
            classify_response(
                "{\"status\":\" success \",\"old_string\":\"a\",\"new_string\":\"b\"}"
            ),
            EditProposal::Success {
                old_string: "a".to_string(),
                new_string: "b".to_string(),
            }
        );
    }

    #[test]
    fn mistyped_fields_fall_back() {
        let proposal = classify_response("{\"status\":\"replace_all\",\"content\":42}");
        assert_eq!(proposal.status(), ProposalStatus::Conversation);
    }

    #[test]
    fn empty_reply_is_an_error() {
        assert_eq!(classify_response("   \n"), EditProposal::error(EMPTY_RESPONSE_MESSAGE));
    }
}
