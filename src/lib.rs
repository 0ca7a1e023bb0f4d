//! Proposal protocol for an LLM-backed text editing assistant.
//!
//! A request (document, instruction or feedback, history) is validated,
//! composed into a chat prompt, sent to the model once, and the reply is
//! classified into exactly one [`EditProposal`].

pub mod api;
pub mod assistant;
pub mod cli;
pub mod commands;
pub mod errors;
pub mod models;
pub mod proposal_processing;
pub mod server;
pub mod utils;

pub use assistant::EditAssistant;
pub use errors::AppError;
pub use models::{Edit, EditProposal, EditRequest, Message, PreviousProposal, Role};
