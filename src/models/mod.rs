pub mod message;
pub mod proposal;
pub mod request;

pub use message::{Message, Role};
pub use proposal::{Edit, EditProposal, ProposalStatus};
pub use request::{EditRequest, PreviousProposal};
