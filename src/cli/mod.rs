pub mod args;
pub mod display;
