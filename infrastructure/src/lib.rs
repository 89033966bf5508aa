//! Infrastructure layer for tribunal
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat,
    FileProviderConfig,
};
pub use logging::JsonlTranscriptLogger;
pub use providers::OpenAiGateway;
