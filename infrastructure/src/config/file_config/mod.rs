//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod personas;
mod provider;

pub use output::{FileOutputConfig, FileOutputFormat};
pub use personas::{FilePersonaConfig, FilePersonasConfig};
pub use provider::FileProviderConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tribunal_application::{DeliberationConfig, PersonaSettings};
use tribunal_domain::{Model, Persona, RetryPolicy};

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("retry.max_attempts cannot be 0")]
    InvalidMaxAttempts,

    #[error("personas.{persona}.temperature must be between 0 and 2, got {value}")]
    InvalidTemperature { persona: Persona, value: f32 },

    #[error("personas.{persona}.max_tokens cannot be 0")]
    InvalidMaxTokens { persona: Persona },

    #[error("{field}: model name cannot be empty")]
    EmptyModelName { field: String },

    #[error("provider.base_url cannot be empty")]
    EmptyBaseUrl,
}

/// Raw retry configuration (`[retry]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts(),
            base_delay_ms: policy.base_delay_ms(),
        }
    }
}

/// Raw deliberation behavior (`[deliberation]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeliberationConfig {
    /// Reject judgments missing required keys
    pub validate_schema: bool,
}

impl Default for FileDeliberationConfig {
    fn default() -> Self {
        Self {
            validate_schema: true,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider endpoint and default model
    pub provider: FileProviderConfig,
    /// Retry policy shared by every agent call
    pub retry: FileRetryConfig,
    /// Per-persona overrides
    pub personas: FilePersonasConfig,
    pub deliberation: FileDeliberationConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.provider.validate()?;

        if self.retry.max_attempts == 0 {
            return Err(ConfigValidationError::InvalidMaxAttempts);
        }

        for persona in [Persona::Optimist, Persona::Skeptic, Persona::Arbiter] {
            self.personas.get(persona).validate(persona)?;
        }

        Ok(())
    }

    /// Validate and convert into the application's deliberation settings.
    pub fn to_deliberation_config(&self) -> Result<DeliberationConfig, ConfigValidationError> {
        self.validate()?;

        let retry_policy = RetryPolicy::new(self.retry.max_attempts, self.retry.base_delay_ms)
            .map_err(|_| ConfigValidationError::InvalidMaxAttempts)?;
        let default_model = Model::from_id(self.provider.model.trim());
        let defaults = DeliberationConfig::default();

        let settings = |persona: Persona| -> PersonaSettings {
            self.personas
                .get(persona)
                .apply(defaults.persona(persona), &default_model)
        };

        Ok(DeliberationConfig {
            optimist: settings(Persona::Optimist),
            skeptic: settings(Persona::Skeptic),
            arbiter: settings(Persona::Arbiter),
            retry_policy,
            timeout: Duration::from_secs(self.provider.timeout_seconds),
            validate_schema: self.deliberation.validate_schema,
        })
    }
}
