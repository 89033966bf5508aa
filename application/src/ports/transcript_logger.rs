//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording deliberation events
//! (agent requests, retries, responses, stage failures) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields. The adapter adds the timestamp when writing.
#[derive(Debug, Clone)]
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "agent_request", "agent_retry", "deliberation_completed").
    pub event_type: &'static str,
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// `log` is synchronous and infallible; a failing sink must never break a
/// deliberation.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
