//! Deliberation configuration.

use std::time::Duration;
use tribunal_domain::{DEFAULT_TIMEOUT, Model, Persona, RetryPolicy};

/// Model settings for one persona
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaSettings {
    pub model: Model,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl PersonaSettings {
    pub fn new(model: Model, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            model,
            temperature,
            max_output_tokens,
        }
    }
}

/// Controls how [`RunDeliberationUseCase`](crate::RunDeliberationUseCase)
/// builds its agent requests.
///
/// The arbiter runs colder than the opposing personas so its judgment stays
/// close to the evidence it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliberationConfig {
    pub optimist: PersonaSettings,
    pub skeptic: PersonaSettings,
    pub arbiter: PersonaSettings,
    pub retry_policy: RetryPolicy,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Reject judgments missing the analysis kind's required keys
    pub validate_schema: bool,
}

impl Default for DeliberationConfig {
    fn default() -> Self {
        Self {
            optimist: PersonaSettings::new(Model::default(), 0.8, 2000),
            skeptic: PersonaSettings::new(Model::default(), 0.7, 2000),
            arbiter: PersonaSettings::new(Model::default(), 0.4, 3000),
            retry_policy: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            validate_schema: true,
        }
    }
}

impl DeliberationConfig {
    pub fn persona(&self, persona: Persona) -> &PersonaSettings {
        match persona {
            Persona::Optimist => &self.optimist,
            Persona::Skeptic => &self.skeptic,
            Persona::Arbiter => &self.arbiter,
        }
    }

    /// Run every persona on the same model.
    pub fn with_model(mut self, model: Model) -> Self {
        self.optimist.model = model.clone();
        self.skeptic.model = model.clone();
        self.arbiter.model = model;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn without_schema_validation(mut self) -> Self {
        self.validate_schema = false;
        self
    }
}
