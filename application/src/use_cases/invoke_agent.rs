//! Invoke Agent use case
//!
//! Obtains one text completion from the provider: per-attempt timeout,
//! failure classification, exponential backoff between retryable failures.

use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tribunal_domain::{AgentFailure, AgentOutcome, AgentRequest, ErrorKind};

/// Calls the provider for a single [`AgentRequest`].
///
/// Holds no per-call state, so one caller can serve any number of
/// concurrent invocations.
pub struct AgentCaller<G: CompletionGateway> {
    gateway: Arc<G>,
    logger: Arc<dyn TranscriptLogger>,
}

impl<G: CompletionGateway> Clone for AgentCaller<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            logger: Arc::clone(&self.logger),
        }
    }
}

impl<G: CompletionGateway> AgentCaller<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            logger: Arc::new(NoTranscriptLogger),
        }
    }

    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run `request` until it succeeds, fails terminally, or the retry
    /// policy runs out of attempts.
    pub async fn invoke(&self, request: &AgentRequest) -> AgentOutcome {
        let policy = *request.retry_policy();
        let model = request.model().to_string();

        self.logger.log(TranscriptEvent::new(
            "agent_request",
            json!({
                "model": model,
                "temperature": request.temperature(),
                "max_output_tokens": request.max_output_tokens(),
                "max_attempts": policy.max_attempts(),
                "system_prompt": request.system_prompt(),
                "user_prompt": request.user_prompt(),
            }),
        ));

        let mut attempt = 1;
        loop {
            debug!(
                model = %model,
                attempt,
                max_attempts = policy.max_attempts(),
                "Sending agent request"
            );

            match self.attempt(request).await {
                Ok(content) => {
                    info!(model = %model, attempt, bytes = content.len(), "Agent responded");
                    self.logger.log(TranscriptEvent::new(
                        "agent_response",
                        json!({
                            "model": model,
                            "attempts": attempt,
                            "bytes": content.len(),
                            "text": content,
                        }),
                    ));
                    return AgentOutcome::success(content);
                }
                Err(failure) if failure.retryable && policy.allows_retry_after(attempt) => {
                    let delay = policy.delay_for_attempt(attempt);
                    warn!(
                        model = %model,
                        attempt,
                        code = failure.code(),
                        delay_ms = delay.as_millis() as u64,
                        "Agent request failed, retrying: {}",
                        failure.message
                    );
                    self.logger.log(TranscriptEvent::new(
                        "agent_retry",
                        json!({
                            "model": model,
                            "attempt": attempt,
                            "code": failure.code(),
                            "message": failure.message,
                            "delay_ms": delay.as_millis() as u64,
                        }),
                    ));
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(failure) => {
                    warn!(
                        model = %model,
                        attempt,
                        code = failure.code(),
                        "Agent request failed: {}",
                        failure.message
                    );
                    self.logger.log(TranscriptEvent::new(
                        "agent_failure",
                        json!({
                            "model": model,
                            "attempts": attempt,
                            "code": failure.code(),
                            "message": failure.message,
                            "http_status": failure.http_status,
                        }),
                    ));
                    return AgentOutcome::failure(failure);
                }
            }
        }
    }

    /// One provider round-trip bounded by the request timeout.
    async fn attempt(&self, request: &AgentRequest) -> Result<String, AgentFailure> {
        let timeout = request.timeout();

        match tokio::time::timeout(timeout, self.gateway.complete(request)).await {
            Err(_) => Err(AgentFailure::new(
                ErrorKind::Timeout,
                format!("no response within {}s", timeout.as_secs_f64()),
            )),
            Ok(Err(error)) => Err(error.into_failure()),
            Ok(Ok(completion)) => completion
                .content
                .filter(|content| !content.trim().is_empty())
                .ok_or_else(|| {
                    AgentFailure::new(
                        ErrorKind::EmptyResponse,
                        "provider returned no text content",
                    )
                }),
        }
    }
}
