//! Domain layer for tribunal
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Deliberation
//!
//! A deliberation asks two opposing personas about the same topic and lets a
//! third one judge:
//!
//! - **Optimist** and **Skeptic** answer the same prompt concurrently
//! - **Arbiter** reads both structured answers and produces the final judgment
//!
//! ## Agent calls
//!
//! Every persona answer is a single [`AgentRequest`] to a text-generation
//! provider. Failures are classified into an [`ErrorKind`] that decides
//! whether the call is retried.

pub mod agent;
pub mod config;
pub mod core;
pub mod deliberation;
pub mod parsing;
pub mod prompt;

// Re-export commonly used types
pub use agent::{
    error_kind::{ErrorKind, ProviderErrorBody, ProviderErrorEnvelope},
    outcome::{AgentFailure, AgentOutcome},
    request::{AgentRequest, AgentRequestBuilder, DEFAULT_TIMEOUT, RetryPolicy},
};
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model, topic::Topic};
pub use deliberation::{
    analysis::AnalysisKind,
    entities::{DeliberationState, Phase},
    persona::Persona,
    value_objects::{DeliberationInput, DeliberationResult, StageOutput, StructuredJudgment, Timings},
};
pub use parsing::json::{extract, extract_value, missing_required_keys};
pub use prompt::PromptTemplate;
