//! Prompt templates for the deliberation flow

use crate::deliberation::analysis::AnalysisKind;
use crate::deliberation::persona::Persona;
use serde_json::Value;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for `persona` running an analysis of `kind`.
    ///
    /// The stance comes from the persona; the required JSON shape from the
    /// analysis kind.
    pub fn system_prompt(kind: AnalysisKind, persona: Persona) -> String {
        let format = match persona {
            Persona::Optimist | Persona::Skeptic => Self::persona_format(kind),
            Persona::Arbiter => Self::judgment_format(kind),
        };

        format!(
            "{}\n\n{}\n\nRespond with a single JSON object and nothing else. Do not wrap it in markdown.\n\n{}",
            Self::stance(persona),
            Self::subject(kind),
            format
        )
    }

    fn stance(persona: Persona) -> &'static str {
        match persona {
            Persona::Optimist => {
                r#"You are an optimistic venture analyst who looks for reasons an idea can win.
Find the strongest opportunities, underserved audiences and tailwinds in the evidence.
Stay grounded: every claim must be supported by the provided context or well-known market facts."#
            }
            Persona::Skeptic => {
                r#"You are a skeptical due-diligence analyst who looks for reasons an idea will fail.
Find the weakest assumptions, saturated markets, hidden costs and adoption barriers in the evidence.
Stay fair: do not invent problems that the provided context contradicts."#
            }
            Persona::Arbiter => {
                r#"You are an impartial investment committee chair.
You receive an optimistic and a skeptical analysis of the same topic.
Weigh both sides, keep what is well supported, discard what is not, and reach a clear decision."#
            }
        }
    }

    fn subject(kind: AnalysisKind) -> &'static str {
        match kind {
            AnalysisKind::DeepAnalysis => {
                "The subject is a startup idea. Focus on the customer pain it addresses and its risk/opportunity balance."
            }
            AnalysisKind::NicheDeepAnalysis => {
                "The subject is a market niche. Focus on who is in it, how reachable they are and whether it can sustain a business."
            }
            AnalysisKind::ProductSpec => {
                "The subject is a product idea. Focus on what the first shippable version must contain."
            }
        }
    }

    fn persona_format(kind: AnalysisKind) -> &'static str {
        match kind {
            AnalysisKind::DeepAnalysis => {
                r#"JSON format:
{
  "pains": [{"pain": string, "severity": 1-10, "evidence": string}],
  "arguments": [string],
  "opportunities": [string],
  "risks": [string],
  "score": 1-10
}"#
            }
            AnalysisKind::NicheDeepAnalysis => {
                r#"JSON format:
{
  "audience_segments": [{"segment": string, "size_estimate": string, "reachability": 1-10}],
  "market_signals": [string],
  "arguments": [string],
  "competition": [string],
  "score": 1-10
}"#
            }
            AnalysisKind::ProductSpec => {
                r#"JSON format:
{
  "must_have_features": [{"feature": string, "reason": string}],
  "nice_to_have_features": [string],
  "technical_risks": [string],
  "arguments": [string],
  "estimated_effort_weeks": number
}"#
            }
        }
    }

    fn judgment_format(kind: AnalysisKind) -> &'static str {
        match kind {
            AnalysisKind::DeepAnalysis => {
                r#"JSON format:
{
  "main_pain": string,
  "verdict": "go" | "pivot" | "no_go",
  "confidence": 0-100,
  "opportunities": [string],
  "risks": [{"risk": string, "mitigation": string}],
  "points_of_agreement": [string],
  "resolved_disagreements": [{"topic": string, "resolution": string}],
  "next_steps": [string]
}"#
            }
            AnalysisKind::NicheDeepAnalysis => {
                r#"JSON format:
{
  "niche": string,
  "verdict": "enter" | "validate_first" | "avoid",
  "confidence": 0-100,
  "best_segment": string,
  "entry_strategy": [string],
  "risks": [{"risk": string, "mitigation": string}],
  "signals_to_watch": [string]
}"#
            }
            AnalysisKind::ProductSpec => {
                r#"JSON format:
{
  "product_name": string,
  "problem_statement": string,
  "target_users": [string],
  "core_features": [{"feature": string, "priority": "p0" | "p1" | "p2"}],
  "mvp_scope": string,
  "out_of_scope": [string],
  "risks": [{"risk": string, "mitigation": string}],
  "success_metrics": [string]
}"#
            }
        }
    }

    /// User prompt shared by the optimist and the skeptic.
    ///
    /// Deterministic for a given topic and context.
    pub fn deliberation_prompt(kind: AnalysisKind, topic: &str, context: &Value) -> String {
        let mut prompt = format!("{}: {}\n", kind.display_name(), topic);

        if Self::has_context(context) {
            prompt.push_str("\nSupporting research data:\n");
            prompt.push_str(&Self::pretty(context));
            prompt.push('\n');
        } else {
            prompt.push_str("\nNo supporting research data is available; rely on general market knowledge.\n");
        }

        prompt.push_str("\nAnalyze the subject from your perspective using the required JSON format.");
        prompt
    }

    /// User prompt for the arbiter, embedding both opposing analyses verbatim.
    pub fn arbiter_prompt(
        kind: AnalysisKind,
        topic: &str,
        optimist: &Value,
        skeptic: &Value,
    ) -> String {
        format!(
            r#"{}: {}

## OPTIMIST ANALYSIS
{}

## SKEPTIC ANALYSIS
{}

Weigh both analyses and produce the final judgment in the required JSON format."#,
            kind.display_name(),
            topic,
            Self::pretty(optimist),
            Self::pretty(skeptic)
        )
    }

    fn has_context(context: &Value) -> bool {
        match context {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        }
    }

    fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}
