//! Use cases for the application layer

pub mod invoke_agent;
pub mod run_deliberation;
