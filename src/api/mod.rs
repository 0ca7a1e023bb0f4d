pub mod client;
pub mod config;
pub mod errors;
pub mod invoker;
pub mod mock;

pub use client::OpenAiApi;
pub use errors::ApiError;
pub use invoker::ModelInvoker;
pub use mock::ScriptedInvoker;
