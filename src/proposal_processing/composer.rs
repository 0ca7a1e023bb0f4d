use super::feedback::ResolvedTurn;
use crate::api::config::SYSTEM_PROMPT;
use crate::models::Message;

/// Builds the exact message sequence sent to the model: the fixed system
/// prompt, the normalized history in order, then the resolved user turn.
pub fn compose_messages(history: Vec<Message>, turn: &ResolvedTurn) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(SYSTEM_PROMPT));
    messages.extend(history);
    messages.push(Message::user(turn.content.clone()));
    messages
}
