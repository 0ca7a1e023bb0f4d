use crate::models::{Message, Role};
use serde_json::Value;

/// How an incoming turn should be presented back to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnKind {
    /// A serialized proposal or other JSON the assistant produced earlier.
    Structured(Value),
    /// Ordinary conversational text.
    FreeText,
}

/// Decides whether an assistant turn carries structured content.
/// Parse failure is the expected answer for conversational text.
pub fn classify_turn(message: &Message) -> TurnKind {
    if message.role != Role::Assistant {
        return TurnKind::FreeText;
    }
    match serde_json::from_str::<Value>(&message.content) {
        Ok(value) => TurnKind::Structured(value),
        Err(_) => TurnKind::FreeText,
    }
}

/// Re-encodes structured assistant turns compactly so the model sees its past
/// proposals in one consistent form. Everything else passes through as-is.
pub fn normalize_history(history: &[Message]) -> Vec<Message> {
    history
        .iter()
        .map(|message| match classify_turn(message) {
            TurnKind::Structured(value) => Message::new(message.role, value.to_string()),
            TurnKind::FreeText => message.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn structured_assistant_turns_round_trip() {
        let original = "{\n  \"status\": \"success\",\n  \"old_string\": \"a\",\n  \"new_string\": \"b\"\n}";
        let normalized = normalize_history(&[Message::assistant(original)]);

        let reparsed: Value = serde_json::from_str(&normalized[0].content).unwrap();
        let expected: Value = serde_json::from_str(original).unwrap();
        assert_eq!(reparsed, expected);
        assert_eq!(normalized[0].role, Role::Assistant);
    }

    #[test]
    fn conversational_turns_pass_through() {
        let history = vec![
            Message::system("Applied the proposal."),
            Message::user("{\"status\":\"success\"}"),
            Message::assistant("Sure, which paragraph?"),
        ];

        assert_eq!(normalize_history(&history), history);
    }

    #[test]
    fn order_is_preserved() {
        let history = vec![
            Message::user("one"),
            Message::assistant("{\"status\": \"conversation\", \"message\": \"two\"}"),
            Message::user("three"),
        ];
        let normalized = normalize_history(&history);

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].content, "one");
        assert_eq!(
            serde_json::from_str::<Value>(&normalized[1].content).unwrap(),
            json!({"status": "conversation", "message": "two"})
        );
        assert_eq!(normalized[2].content, "three");
    }

    #[test]
    fn only_assistant_turns_are_classified_structured() {
        assert_eq!(classify_turn(&Message::user("{}")), TurnKind::FreeText);
        assert_eq!(
            classify_turn(&Message::assistant("{}")),
            TurnKind::Structured(json!({}))
        );
        assert_eq!(classify_turn(&Message::assistant("not {json")), TurnKind::FreeText);
    }
}
