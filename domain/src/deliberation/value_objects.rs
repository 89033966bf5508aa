//! Deliberation value objects - inputs and immutable result types.
//!
//! - [`DeliberationInput`] - topic + supporting context for one run
//! - [`StageOutput`] - one persona's raw answer and its parsed JSON
//! - [`Timings`] - wall-clock durations of each phase
//! - [`DeliberationResult`] - complete result of a run

use super::analysis::AnalysisKind;
use super::persona::Persona;
use crate::core::topic::Topic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The arbiter's parsed JSON. Opaque to the orchestrator; its shape depends
/// on the [`AnalysisKind`].
pub type StructuredJudgment = Value;

/// Input for one deliberation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationInput {
    topic: Topic,
    /// Pain points, audience segments, market signals... passed unchanged
    /// to both opposing personas.
    context: Value,
    kind: AnalysisKind,
}

impl DeliberationInput {
    pub fn new(topic: Topic, context: Value) -> Self {
        Self {
            topic,
            context,
            kind: AnalysisKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: AnalysisKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn context(&self) -> &Value {
        &self.context
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    /// Names of the top-level context entries, reported as the data sources
    /// the analysis was based on.
    pub fn data_sources(&self) -> Vec<String> {
        match &self.context {
            Value::Object(map) => map
                .iter()
                .filter(|(_, v)| !is_empty_value(v))
                .map(|(k, _)| k.clone())
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Output of one persona stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutput {
    pub persona: Persona,
    /// Raw text returned by the provider
    pub raw: String,
    /// JSON extracted from `raw`
    pub parsed: Value,
    pub elapsed_ms: u64,
}

impl StageOutput {
    pub fn new(persona: Persona, raw: impl Into<String>, parsed: Value, elapsed_ms: u64) -> Self {
        Self {
            persona,
            raw: raw.into(),
            parsed,
            elapsed_ms,
        }
    }
}

/// Wall-clock durations of a deliberation, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    pub parallel_ms: u64,
    pub arbitration_ms: u64,
    /// From the start of the parallel phase to the end of arbitration
    pub total_ms: u64,
}

/// Complete result of a deliberation
///
/// Created per request and never persisted by the core; callers decide
/// whether to store it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationResult {
    pub topic: String,
    pub kind: AnalysisKind,
    pub optimist: StageOutput,
    pub skeptic: StageOutput,
    pub arbiter: StageOutput,
    /// Caller-stamped metadata, kept apart from the judgment itself
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
    pub timings: Timings,
}

impl DeliberationResult {
    pub fn new(
        topic: impl Into<String>,
        kind: AnalysisKind,
        optimist: StageOutput,
        skeptic: StageOutput,
        arbiter: StageOutput,
        timings: Timings,
    ) -> Self {
        Self {
            topic: topic.into(),
            kind,
            optimist,
            skeptic,
            arbiter,
            metadata: Map::new(),
            timings,
        }
    }

    /// The arbiter's structured judgment, exactly as parsed.
    pub fn judgment(&self) -> &StructuredJudgment {
        &self.arbiter.parsed
    }

    /// Attach caller metadata (data sources, generation time, ...).
    ///
    /// Returns `false` and stores nothing when `key` names a field of the
    /// judgment itself.
    pub fn stamp_metadata(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if self
            .arbiter
            .parsed
            .as_object()
            .is_some_and(|judgment| judgment.contains_key(&key))
        {
            return false;
        }
        self.metadata.insert(key, value);
        true
    }

    /// The judgment with metadata merged in. Core fields always win.
    pub fn stamped_judgment(&self) -> StructuredJudgment {
        match &self.arbiter.parsed {
            Value::Object(judgment) => {
                let mut merged = judgment.clone();
                for (key, value) in &self.metadata {
                    merged.entry(key.clone()).or_insert_with(|| value.clone());
                }
                Value::Object(merged)
            }
            other => other.clone(),
        }
    }
}
