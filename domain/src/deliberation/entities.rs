//! Deliberation phases and run state machine

use serde::{Deserialize, Serialize};

/// Phase of a deliberation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Optimist and skeptic answer concurrently
    Deliberation,
    /// Arbiter synthesizes both answers
    Arbitration,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Deliberation => "deliberation",
            Phase::Arbitration => "arbitration",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Deliberation => "Parallel Deliberation",
            Phase::Arbitration => "Arbitration",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// State of one end-to-end deliberation
///
/// ```text
/// Started → ParallelRunning → ParallelFailed
///                           → ParallelSucceeded → ArbiterRunning → ArbiterFailed
///                                                                → Complete
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliberationState {
    Started,
    ParallelRunning,
    ParallelFailed,
    ParallelSucceeded,
    ArbiterRunning,
    ArbiterFailed,
    Complete,
}

impl DeliberationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliberationState::Started => "started",
            DeliberationState::ParallelRunning => "parallel_running",
            DeliberationState::ParallelFailed => "parallel_failed",
            DeliberationState::ParallelSucceeded => "parallel_succeeded",
            DeliberationState::ArbiterRunning => "arbiter_running",
            DeliberationState::ArbiterFailed => "arbiter_failed",
            DeliberationState::Complete => "complete",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeliberationState::ParallelFailed
                | DeliberationState::ArbiterFailed
                | DeliberationState::Complete
        )
    }

    pub fn can_transition_to(&self, next: DeliberationState) -> bool {
        use DeliberationState::*;
        matches!(
            (self, next),
            (Started, ParallelRunning)
                | (ParallelRunning, ParallelFailed)
                | (ParallelRunning, ParallelSucceeded)
                | (ParallelSucceeded, ArbiterRunning)
                | (ArbiterRunning, ArbiterFailed)
                | (ArbiterRunning, Complete)
        )
    }
}

impl std::fmt::Display for DeliberationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
