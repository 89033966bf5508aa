//! Console output formatter for deliberation results

use colored::Colorize;
use serde_json::Value;
use tribunal_application::DeliberationError;
use tribunal_domain::{DeliberationResult, StageOutput};

/// Formats deliberation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete deliberation
    pub fn format(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Tribunal Deliberation"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), result.topic));
        output.push_str(&format!(
            "{} {}\n\n",
            "Analysis:".cyan().bold(),
            result.kind.display_name()
        ));

        output.push_str(&Self::section_header("Phase 1: Deliberation"));
        for stage in [&result.optimist, &result.skeptic] {
            output.push_str(&Self::stage(stage));
        }

        output.push_str(&Self::section_header("Phase 2: Judgment"));
        output.push('\n');
        output.push_str(&Self::render(&result.stamped_judgment(), 0));

        output.push_str(&format!(
            "\n{} parallel {}ms, arbitration {}ms, total {}ms\n",
            "Timings:".dimmed(),
            result.timings.parallel_ms,
            result.timings.arbitration_ms,
            result.timings.total_ms
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format the judgment only (concise output)
    pub fn format_judgment_only(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Tribunal Judgment ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), result.topic));
        output.push_str(&Self::render(&result.stamped_judgment(), 0));

        output
    }

    /// Format as JSON
    pub fn format_json(result: &DeliberationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a failed deliberation for stderr
    pub fn format_error(error: &DeliberationError) -> String {
        let mut output = format!("{} {}\n", "Error:".red().bold(), error.user_message());

        let mut detail = format!("code: {}", error.code());
        if let Some(persona) = error.persona() {
            detail.push_str(&format!(", stage: {}", persona));
        }
        output.push_str(&format!("  {}\n", detail.dimmed()));
        output.push_str(&format!("  {}\n", error.to_string().dimmed()));

        output
    }

    fn stage(stage: &StageOutput) -> String {
        format!(
            "\n{}\n{}",
            format!("── {} ({}ms) ──", stage.persona.display_name(), stage.elapsed_ms)
                .yellow()
                .bold(),
            Self::render(&stage.parsed, 0)
        )
    }

    /// Render a JSON value as indented `key: value` lines.
    pub fn render(value: &Value, depth: usize) -> String {
        let pad = "  ".repeat(depth);
        let mut output = String::new();

        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    if Self::is_scalar(value) {
                        output.push_str(&format!(
                            "{}{} {}\n",
                            pad,
                            format!("{}:", key).bold(),
                            Self::scalar(value)
                        ));
                    } else {
                        output.push_str(&format!("{}{}\n", pad, format!("{}:", key).bold()));
                        output.push_str(&Self::render(value, depth + 1));
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if Self::is_scalar(item) {
                        output.push_str(&format!("{}* {}\n", pad, Self::scalar(item)));
                    } else {
                        output.push_str(&format!("{}*\n", pad));
                        output.push_str(&Self::render(item, depth + 1));
                    }
                }
            }
            scalar => {
                output.push_str(&format!("{}{}\n", pad, Self::scalar(scalar)));
            }
        }

        output
    }

    fn is_scalar(value: &Value) -> bool {
        !matches!(value, Value::Object(_) | Value::Array(_))
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tribunal_domain::{AgentFailure, AnalysisKind, ErrorKind, Persona, Timings};

    fn result() -> DeliberationResult {
        colored::control::set_override(false);
        let optimist = json!({"pains": [{"pain": "Planning takes hours", "severity": 8}]});
        let skeptic = json!({"pains": [{"pain": "Crowded market", "severity": 7}]});
        let judgment = json!({
            "main_pain": "Weekly meal planning takes too long",
            "verdict": "promising",
            "confidence": 0.7
        });

        let mut result = DeliberationResult::new(
            "AI meal planning app",
            AnalysisKind::DeepAnalysis,
            StageOutput::new(Persona::Optimist, optimist.to_string(), optimist, 1200),
            StageOutput::new(Persona::Skeptic, skeptic.to_string(), skeptic, 1500),
            StageOutput::new(Persona::Arbiter, judgment.to_string(), judgment, 900),
            Timings {
                parallel_ms: 1500,
                arbitration_ms: 900,
                total_ms: 2400,
            },
        );
        result.stamp_metadata("data_sources", json!(["reddit"]));
        result
    }

    #[test]
    fn test_full_format_contains_every_stage() {
        let output = ConsoleFormatter::format(&result());

        assert!(output.contains("Topic: AI meal planning app"));
        assert!(output.contains("Planning takes hours"));
        assert!(output.contains("Crowded market"));
        assert!(output.contains("main_pain: Weekly meal planning takes too long"));
        assert!(output.contains("* reddit"));
        assert!(output.contains("total 2400ms"));
    }

    #[test]
    fn test_judgment_only_omits_persona_analyses() {
        let output = ConsoleFormatter::format_judgment_only(&result());

        assert!(output.contains("verdict: promising"));
        assert!(!output.contains("Crowded market"));
    }

    #[test]
    fn test_json_format_is_parseable() {
        let output = ConsoleFormatter::format_json(&result());
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["topic"], "AI meal planning app");
        assert_eq!(value["arbiter"]["parsed"]["verdict"], "promising");
        assert_eq!(value["metadata"]["data_sources"][0], "reddit");
    }

    #[test]
    fn test_format_error_shows_code_and_stage() {
        colored::control::set_override(false);
        let error = DeliberationError::Provider {
            persona: Persona::Skeptic,
            failure: AgentFailure::new(ErrorKind::RateLimitExceeded, "HTTP 429").with_status(429),
        };

        let output = ConsoleFormatter::format_error(&error);

        assert!(output.contains(ErrorKind::RateLimitExceeded.user_message()));
        assert!(output.contains("code: rate_limit_exceeded, stage: skeptic"));
    }

    #[test]
    fn test_render_nested_values() {
        colored::control::set_override(false);
        let rendered = ConsoleFormatter::render(
            &json!({"core_features": ["planner", "grocery list"], "mvp_scope": {"weeks": 6}}),
            0,
        );

        assert!(rendered.contains("core_features:\n  * planner\n  * grocery list\n"));
        assert!(rendered.contains("mvp_scope:\n  weeks: 6\n"));
    }
}
