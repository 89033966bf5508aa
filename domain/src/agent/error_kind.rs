//! Failure taxonomy for agent calls.
//!
//! Every failure a persona call can end in maps to one [`ErrorKind`]. The
//! kind carries the stable machine code the frontend branches on, a short
//! user-facing message, and whether the agent caller may retry it.
//!
//! | Kind | Code | Retryable |
//! |------|------|-----------|
//! | `RateLimitExceeded` | `rate_limit_exceeded` | yes |
//! | `InvalidApiKey` | `invalid_api_key` | no |
//! | `InsufficientQuota` | `insufficient_quota` | no |
//! | `ModelNotFound` | `model_not_found` | no |
//! | `ContextLengthExceeded` | `context_length_exceeded` | no |
//! | `ServerError` | `server_error` | yes |
//! | `Timeout` | `timeout` | yes |
//! | `NetworkError` | `network_error` | yes |
//! | `EmptyResponse` | `empty_response` | yes |
//! | `UnparseableResponse` | `unparseable_response` | no |
//! | `SchemaInvalid` | `schema_invalid` | no |
//! | `Unknown` | `unknown` | yes |

use serde::{Deserialize, Serialize};

/// Classified failure of an agent call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RateLimitExceeded,
    InvalidApiKey,
    InsufficientQuota,
    ModelNotFound,
    ContextLengthExceeded,
    ServerError,
    Timeout,
    NetworkError,
    EmptyResponse,
    UnparseableResponse,
    SchemaInvalid,
    Unknown,
}

impl ErrorKind {
    /// Stable machine code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::RateLimitExceeded => "rate_limit_exceeded",
            ErrorKind::InvalidApiKey => "invalid_api_key",
            ErrorKind::InsufficientQuota => "insufficient_quota",
            ErrorKind::ModelNotFound => "model_not_found",
            ErrorKind::ContextLengthExceeded => "context_length_exceeded",
            ErrorKind::ServerError => "server_error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::NetworkError => "network_error",
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::UnparseableResponse => "unparseable_response",
            ErrorKind::SchemaInvalid => "schema_invalid",
            ErrorKind::Unknown => "unknown",
        }
    }

    /// Whether the agent caller may retry a call that failed this way.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimitExceeded
                | ErrorKind::ServerError
                | ErrorKind::Timeout
                | ErrorKind::NetworkError
                | ErrorKind::EmptyResponse
                | ErrorKind::Unknown
        )
    }

    /// Short, actionable message safe to show to end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::RateLimitExceeded => {
                "The AI provider is receiving too many requests. Please wait a moment and try again."
            }
            ErrorKind::InvalidApiKey => {
                "The AI provider rejected the API key. Check the configured credentials."
            }
            ErrorKind::InsufficientQuota => {
                "The AI provider account has run out of credits. Check billing and usage limits."
            }
            ErrorKind::ModelNotFound => {
                "The configured AI model is not available. Choose a different model."
            }
            ErrorKind::ContextLengthExceeded => {
                "The request is too long for the selected model. Shorten the input and try again."
            }
            ErrorKind::ServerError => {
                "The AI provider is having problems right now. Please try again later."
            }
            ErrorKind::Timeout => "The AI provider took too long to respond. Please try again.",
            ErrorKind::NetworkError => {
                "Could not reach the AI provider. Check your network connection and try again."
            }
            ErrorKind::EmptyResponse => "The AI provider returned an empty answer. Please try again.",
            ErrorKind::UnparseableResponse => {
                "The analysis could not be read. Please run it again."
            }
            ErrorKind::SchemaInvalid => {
                "The analysis came back incomplete. Please run it again."
            }
            ErrorKind::Unknown => "Something went wrong while running the analysis. Please try again.",
        }
    }

    /// Classify a non-success HTTP response from the provider.
    ///
    /// Error codes in the body win over the bare status: providers report an
    /// exhausted quota as `429` + `insufficient_quota`, which must not be
    /// retried like a plain rate limit.
    pub fn classify(status: u16, body: &ProviderErrorBody) -> ErrorKind {
        if body.has_code("insufficient_quota") {
            return ErrorKind::InsufficientQuota;
        }
        if body.has_code("context_length_exceeded") || body.mentions_context_length() {
            return ErrorKind::ContextLengthExceeded;
        }
        if body.has_code("model_not_found") {
            return ErrorKind::ModelNotFound;
        }
        if body.has_code("invalid_api_key") {
            return ErrorKind::InvalidApiKey;
        }

        match status {
            429 => ErrorKind::RateLimitExceeded,
            401 => ErrorKind::InvalidApiKey,
            402 => ErrorKind::InsufficientQuota,
            404 => ErrorKind::ModelNotFound,
            s if s >= 500 => ErrorKind::ServerError,
            _ => ErrorKind::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Provider error envelope: `{"error": {"code", "type", "message"}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderErrorEnvelope {
    pub error: ProviderErrorBody,
}

/// Inner error object of a provider error response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProviderErrorBody {
    /// Body carrying only a diagnostic message (e.g. a non-JSON error page).
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code) || self.error_type.as_deref() == Some(code)
    }

    fn mentions_context_length(&self) -> bool {
        self.message.as_deref().is_some_and(|m| {
            let lower = m.to_lowercase();
            lower.contains("context length") || lower.contains("maximum context")
        })
    }

    /// Best available diagnostic text.
    pub fn describe(&self) -> String {
        match (&self.message, &self.code) {
            (Some(message), Some(code)) => format!("{} ({})", message, code),
            (Some(message), None) => message.clone(),
            (None, Some(code)) => code.clone(),
            (None, None) => "no error details".to_string(),
        }
    }
}
