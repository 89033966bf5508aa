//! Completion gateway port
//!
//! Defines the interface for one request/response exchange with a
//! text-generation provider.

use async_trait::async_trait;
use thiserror::Error;
use tribunal_domain::{AgentFailure, AgentRequest, ErrorKind, ProviderErrorBody};

/// Errors of a single provider attempt
///
/// Adapters report what happened on the wire; the
/// [`AgentCaller`](crate::AgentCaller) decides what it means.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection error: {0}")]
    Network(String),

    #[error("Provider returned HTTP {status}: {}", .body.describe())]
    Http { status: u16, body: ProviderErrorBody },

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Classify this error into the failure taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Timeout => ErrorKind::Timeout,
            GatewayError::Network(_) => ErrorKind::NetworkError,
            GatewayError::Http { status, body } => ErrorKind::classify(*status, body),
            GatewayError::Other(_) => ErrorKind::Unknown,
        }
    }

    pub fn into_failure(self) -> AgentFailure {
        let failure = AgentFailure::new(self.kind(), self.to_string());
        match self {
            GatewayError::Http { status, .. } => failure.with_status(status),
            _ => failure,
        }
    }
}

/// Successful provider exchange
///
/// `content` is `None` when the provider answered without any text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub content: Option<String>,
    /// Model that actually served the request, if reported
    pub model: Option<String>,
}

impl Completion {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            model: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Gateway to a text-generation provider
///
/// One call is one attempt: no retries, no timeout handling beyond what the
/// transport does on its own. Implementations must be safe to call
/// concurrently.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, request: &AgentRequest) -> Result<Completion, GatewayError>;
}
