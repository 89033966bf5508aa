//! Agent call domain: one request to a text-generation provider.
//!
//! - [`request`]: [`AgentRequest`](request::AgentRequest) and its [`RetryPolicy`](request::RetryPolicy)
//! - [`outcome`]: success / failure of a whole (retried) call
//! - [`error_kind`]: failure taxonomy and provider error classification

pub mod error_kind;
pub mod outcome;
pub mod request;
