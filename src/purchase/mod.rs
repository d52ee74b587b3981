pub mod error;
pub mod flow;
