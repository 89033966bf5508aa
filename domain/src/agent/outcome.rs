//! Result of a complete agent call (after all retries).

use super::error_kind::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal failure of an agent call
///
/// Keeps the raw diagnostic (`message`) apart from the text that may be
/// shown to users (`user_message`).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct AgentFailure {
    pub kind: ErrorKind,
    pub message: String,
    pub user_message: String,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
}

impl AgentFailure {
    /// Create a failure; `user_message` and `retryable` follow from `kind`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            user_message: kind.user_message().to_string(),
            retryable: kind.is_retryable(),
            http_status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Stable machine code of the failure kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Outcome of [`AgentRequest`](super::request::AgentRequest) execution.
///
/// Exactly one of success or failure, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentOutcome {
    Success { content: String },
    Failure(AgentFailure),
}

impl AgentOutcome {
    pub fn success(content: impl Into<String>) -> Self {
        AgentOutcome::Success {
            content: content.into(),
        }
    }

    pub fn failure(failure: AgentFailure) -> Self {
        AgentOutcome::Failure(failure)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AgentOutcome::Success { .. })
    }

    /// Raw text content if the call succeeded.
    pub fn content(&self) -> Option<&str> {
        match self {
            AgentOutcome::Success { content } => Some(content),
            AgentOutcome::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&AgentFailure> {
        match self {
            AgentOutcome::Success { .. } => None,
            AgentOutcome::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<String, AgentFailure> {
        match self {
            AgentOutcome::Success { content } => Ok(content),
            AgentOutcome::Failure(failure) => Err(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_derives_flags_from_kind() {
        let failure = AgentFailure::new(ErrorKind::RateLimitExceeded, "429 Too Many Requests")
            .with_status(429);
        assert!(failure.retryable);
        assert_eq!(failure.http_status, Some(429));
        assert_eq!(failure.code(), "rate_limit_exceeded");
        assert_eq!(failure.user_message, ErrorKind::RateLimitExceeded.user_message());
        assert_eq!(
            failure.to_string(),
            "rate_limit_exceeded: 429 Too Many Requests"
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = AgentOutcome::success("{\"a\": 1}");
        assert!(ok.is_success());
        assert_eq!(ok.content(), Some("{\"a\": 1}"));
        assert!(ok.as_failure().is_none());

        let failed = AgentOutcome::failure(AgentFailure::new(ErrorKind::InvalidApiKey, "bad key"));
        assert!(!failed.is_success());
        assert!(failed.content().is_none());
        assert_eq!(failed.clone().into_result().unwrap_err().kind, ErrorKind::InvalidApiKey);
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let json = serde_json::to_value(AgentOutcome::success("hi")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["content"], "hi");

        let json = serde_json::to_value(AgentOutcome::failure(AgentFailure::new(
            ErrorKind::Timeout,
            "no response",
        )))
        .unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "timeout");
        assert!(json.get("http_status").is_none());
    }
}
