//! Agent request and retry policy value objects.

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard per-attempt timeout for provider calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;

/// Retry policy for a single agent call (Value Object)
///
/// The delay before retrying after failed attempt `n` (1-based) is
/// `base_delay_ms × 2^(n−1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
}

impl RetryPolicy {
    pub const BACKOFF_MULTIPLIER: u64 = 2;

    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Result<Self, DomainError> {
        if max_attempts == 0 {
            return Err(DomainError::InvalidRetryPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            base_delay_ms,
        })
    }

    /// Single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay_ms(&self) -> u64 {
        self.base_delay_ms
    }

    /// Backoff to wait after failed attempt `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = Self::BACKOFF_MULTIPLIER.saturating_pow(exponent);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Whether another attempt is allowed after `attempt` attempts ran.
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

/// One request to a text-generation provider (Value Object)
///
/// Immutable once built; construct through [`AgentRequest::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRequest {
    system_prompt: String,
    user_prompt: String,
    model: Model,
    temperature: f32,
    max_output_tokens: u32,
    retry_policy: RetryPolicy,
    timeout: Duration,
}

impl AgentRequest {
    pub fn builder(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> AgentRequestBuilder {
        AgentRequestBuilder {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            retry_policy: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder for [`AgentRequest`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct AgentRequestBuilder {
    system_prompt: String,
    user_prompt: String,
    model: Model,
    temperature: f32,
    max_output_tokens: u32,
    retry_policy: RetryPolicy,
    timeout: Duration,
}

impl AgentRequestBuilder {
    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<AgentRequest, DomainError> {
        if self.system_prompt.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "system prompt cannot be empty".to_string(),
            ));
        }
        if self.user_prompt.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "user prompt cannot be empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(DomainError::InvalidRequest(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(DomainError::InvalidRequest(
                "max_output_tokens must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(DomainError::InvalidRequest(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(AgentRequest {
            system_prompt: self.system_prompt,
            user_prompt: self.user_prompt,
            model: self.model,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            retry_policy: self.retry_policy,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_per_attempt() {
        let policy = RetryPolicy::new(5, 250).unwrap();
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(2000));
    }

    #[test]
    fn test_delay_saturates() {
        let policy = RetryPolicy::new(3, u64::MAX / 2).unwrap();
        assert_eq!(policy.delay_for_attempt(64), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert!(RetryPolicy::new(0, 100).is_err());
    }

    #[test]
    fn test_allows_retry_after() {
        let policy = RetryPolicy::new(3, 10).unwrap();
        assert!(policy.allows_retry_after(1));
        assert!(policy.allows_retry_after(2));
        assert!(!policy.allows_retry_after(3));
        assert!(!RetryPolicy::no_retry().allows_retry_after(1));
    }

    #[test]
    fn test_builder_defaults() {
        let request = AgentRequest::builder("You are an analyst.", "Analyze this.")
            .build()
            .unwrap();
        assert_eq!(request.model(), &Model::Gpt4oMini);
        assert_eq!(request.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(request.retry_policy(), &RetryPolicy::default());
        assert_eq!(request.max_output_tokens(), 2000);
    }

    #[test]
    fn test_builder_rejects_empty_prompts() {
        assert!(AgentRequest::builder("", "user").build().is_err());
        assert!(AgentRequest::builder("system", "  \n").build().is_err());
    }

    #[test]
    fn test_builder_rejects_out_of_range_temperature() {
        assert!(AgentRequest::builder("s", "u").temperature(2.5).build().is_err());
        assert!(AgentRequest::builder("s", "u").temperature(-0.1).build().is_err());
        assert!(AgentRequest::builder("s", "u").temperature(2.0).build().is_ok());
        assert!(AgentRequest::builder("s", "u").temperature(0.0).build().is_ok());
    }

    #[test]
    fn test_builder_rejects_zero_tokens_and_timeout() {
        assert!(AgentRequest::builder("s", "u").max_output_tokens(0).build().is_err());
        assert!(
            AgentRequest::builder("s", "u")
                .timeout(Duration::ZERO)
                .build()
                .is_err()
        );
    }
}
