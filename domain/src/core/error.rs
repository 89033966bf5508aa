//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Invalid agent request: {0}")]
    InvalidRequest(String),

    #[error("Invalid retry policy: {0}")]
    InvalidRetryPolicy(String),

    #[error("Unknown analysis kind: {0}")]
    UnknownAnalysisKind(String),
}

impl DomainError {
    /// Stable machine code for callers that branch on input errors.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidTopic(_) => "invalid_topic",
            DomainError::InvalidRequest(_) => "invalid_request",
            DomainError::InvalidRetryPolicy(_) => "invalid_retry_policy",
            DomainError::UnknownAnalysisKind(_) => "unknown_analysis_kind",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::InvalidTopic("empty".to_string());
        assert_eq!(error.to_string(), "Invalid topic: empty");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::InvalidTopic(String::new()).code(), "invalid_topic");
        assert_eq!(
            DomainError::InvalidRequest(String::new()).code(),
            "invalid_request"
        );
        assert_eq!(
            DomainError::UnknownAnalysisKind("x".into()).code(),
            "unknown_analysis_kind"
        );
    }
}
