//! Progress notification port
//!
//! Defines the interface for reporting progress during a deliberation.

use tribunal_domain::{DeliberationState, Persona, Phase};

/// Callback for progress updates during a deliberation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when a persona finishes within a phase
    fn on_task_complete(&self, phase: &Phase, persona: Persona, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);

    /// Called on every state machine transition
    fn on_state_change(&self, _state: DeliberationState) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _persona: Persona, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
