pub mod composer;
pub mod feedback;
pub mod history;
pub mod sanitizer;
pub mod validator;

pub use composer::compose_messages;
pub use feedback::{resolve_turn, EditTarget, ResolvedTurn};
pub use history::{classify_turn, normalize_history, TurnKind};
pub use sanitizer::{classify_response, strip_fence};
pub use validator::{parse_request, validate_request, ValidationError};
