//! Application-level configuration.
//!
//! - [`DeliberationConfig`]: per-persona model settings, retry policy, timeout

pub mod deliberation_config;

pub use deliberation_config::{DeliberationConfig, PersonaSettings};
