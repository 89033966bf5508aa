//! Progress reporting for deliberations

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use tribunal_application::ProgressNotifier;
use tribunal_domain::{DeliberationState, Persona, Phase};

/// Reports progress during a deliberation with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &Phase) -> &'static str {
        match phase {
            Phase::Deliberation => "Phase 1: Deliberation",
            Phase::Arbitration => "Phase 2: Arbitration",
        }
    }

    fn persona_status(persona: Persona, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), persona.display_name())
        } else {
            format!("{} {}", "x".red(), persona.display_name())
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Waiting for personas...");
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Ok(mut bar) = self.phase_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, persona: Persona, success: bool) {
        if let Ok(bar) = self.phase_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::persona_status(persona, success));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Ok(mut bar) = self.phase_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("{} complete", phase.display_name().green()));
        }
    }

    fn on_state_change(&self, state: DeliberationState) {
        if matches!(
            state,
            DeliberationState::ParallelFailed | DeliberationState::ArbiterFailed
        ) {
            let _ = self
                .multi
                .println(format!("{} {}", "x".red(), state.as_str().red()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} personas)",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, persona: Persona, success: bool) {
        eprintln!("  {}", ProgressReporter::persona_status(persona, success));
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(
            ProgressReporter::phase_display_name(&Phase::Deliberation),
            "Phase 1: Deliberation"
        );
        assert_eq!(
            ProgressReporter::phase_display_name(&Phase::Arbitration),
            "Phase 2: Arbitration"
        );
    }

    #[test]
    fn test_reporter_tolerates_full_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_state_change(DeliberationState::Started);
        reporter.on_phase_start(&Phase::Deliberation, 2);
        reporter.on_task_complete(&Phase::Deliberation, Persona::Skeptic, true);
        reporter.on_task_complete(&Phase::Deliberation, Persona::Optimist, false);
        reporter.on_phase_complete(&Phase::Deliberation);
        reporter.on_state_change(DeliberationState::ParallelFailed);

        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
