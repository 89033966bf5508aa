//! Application layer for tribunal
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DeliberationConfig, PersonaSettings};
pub use ports::{
    completion_gateway::{Completion, CompletionGateway, GatewayError},
    progress::{NoProgress, ProgressNotifier},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::invoke_agent::AgentCaller;
pub use use_cases::run_deliberation::{
    ArbiterOutcome, DeliberationError, ParallelOutcome, RunDeliberationUseCase,
};
