//! Run Deliberation use case
//!
//! Runs the optimist and the skeptic concurrently on the same topic, then
//! hands both analyses to the arbiter for a structured judgment.

use crate::config::DeliberationConfig;
use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use crate::use_cases::invoke_agent::AgentCaller;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use tribunal_domain::{
    AgentFailure, AgentOutcome, AgentRequest, DeliberationInput, DeliberationResult,
    DeliberationState, DomainError, ErrorKind, Persona, Phase, PromptTemplate, StageOutput,
    Timings, extract_value, missing_required_keys,
};

/// Errors that end a deliberation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliberationError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("{persona} failed: {failure}")]
    Provider {
        persona: Persona,
        failure: AgentFailure,
    },

    #[error("{persona} returned no parseable JSON")]
    Unparseable { persona: Persona, raw: String },

    #[error("{persona} judgment is missing required keys: {}", .missing.join(", "))]
    SchemaInvalid {
        persona: Persona,
        missing: Vec<String>,
        raw: String,
    },

    #[error("Task join error: {0}")]
    TaskFailed(String),
}

impl DeliberationError {
    /// Stable machine code
    pub fn code(&self) -> &'static str {
        match self {
            DeliberationError::InvalidInput(e) => e.code(),
            DeliberationError::Provider { failure, .. } => failure.code(),
            DeliberationError::Unparseable { .. } => ErrorKind::UnparseableResponse.code(),
            DeliberationError::SchemaInvalid { .. } => ErrorKind::SchemaInvalid.code(),
            DeliberationError::TaskFailed(_) => ErrorKind::Unknown.code(),
        }
    }

    /// Text safe to show to end users
    pub fn user_message(&self) -> String {
        match self {
            DeliberationError::InvalidInput(e) => e.to_string(),
            DeliberationError::Provider { failure, .. } => failure.user_message.clone(),
            DeliberationError::Unparseable { .. } => {
                ErrorKind::UnparseableResponse.user_message().to_string()
            }
            DeliberationError::SchemaInvalid { .. } => {
                ErrorKind::SchemaInvalid.user_message().to_string()
            }
            DeliberationError::TaskFailed(_) => ErrorKind::Unknown.user_message().to_string(),
        }
    }

    /// The persona whose stage failed, if any
    pub fn persona(&self) -> Option<Persona> {
        match self {
            DeliberationError::Provider { persona, .. }
            | DeliberationError::Unparseable { persona, .. }
            | DeliberationError::SchemaInvalid { persona, .. } => Some(*persona),
            _ => None,
        }
    }
}

/// Both opposing analyses, parsed
#[derive(Debug, Clone)]
pub struct ParallelOutcome {
    pub optimist: StageOutput,
    pub skeptic: StageOutput,
    pub parallel_ms: u64,
    /// When the parallel phase started; total timing is measured from here
    pub started_at: Instant,
}

impl ParallelOutcome {
    /// Build from completed stages in any order.
    ///
    /// Returns `None` unless exactly one optimist and one skeptic stage are
    /// present.
    pub fn from_stages(
        stages: Vec<StageOutput>,
        parallel_ms: u64,
        started_at: Instant,
    ) -> Option<Self> {
        let mut optimist = None;
        let mut skeptic = None;
        for stage in stages {
            match stage.persona {
                Persona::Optimist if optimist.is_none() => optimist = Some(stage),
                Persona::Skeptic if skeptic.is_none() => skeptic = Some(stage),
                _ => return None,
            }
        }
        Some(Self {
            optimist: optimist?,
            skeptic: skeptic?,
            parallel_ms,
            started_at,
        })
    }
}

/// The arbiter's stage plus the timings closing the deliberation
#[derive(Debug, Clone)]
pub struct ArbiterOutcome {
    pub arbiter: StageOutput,
    pub arbitration_ms: u64,
    pub total_ms: u64,
}

/// Use case for running a deliberation
pub struct RunDeliberationUseCase<G: CompletionGateway + 'static> {
    caller: AgentCaller<G>,
    logger: Arc<dyn TranscriptLogger>,
    config: DeliberationConfig,
}

impl<G: CompletionGateway + 'static> RunDeliberationUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            caller: AgentCaller::new(gateway),
            logger: Arc::new(NoTranscriptLogger),
            config: DeliberationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DeliberationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.caller = self.caller.with_transcript_logger(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &DeliberationConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: DeliberationInput,
    ) -> Result<DeliberationResult, DeliberationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: DeliberationInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationResult, DeliberationError> {
        info!(
            topic = input.topic().as_str(),
            kind = input.kind().as_str(),
            "Starting deliberation"
        );
        progress.on_state_change(DeliberationState::Started);
        self.logger.log(TranscriptEvent::new(
            "deliberation_started",
            json!({
                "topic": input.topic().as_str(),
                "kind": input.kind().as_str(),
                "data_sources": input.data_sources(),
            }),
        ));

        let result = self.deliberate(&input, progress).await;

        match &result {
            Ok(result) => {
                info!(total_ms = result.timings.total_ms, "Deliberation complete");
                self.logger.log(TranscriptEvent::new(
                    "deliberation_completed",
                    json!({
                        "topic": result.topic,
                        "timings": result.timings,
                        "judgment": result.judgment(),
                    }),
                ));
            }
            Err(e) => {
                warn!(code = e.code(), "Deliberation failed: {}", e);
                self.logger.log(TranscriptEvent::new(
                    "deliberation_failed",
                    json!({
                        "code": e.code(),
                        "persona": e.persona().map(|p| p.as_str()),
                        "message": e.to_string(),
                    }),
                ));
            }
        }

        result
    }

    async fn deliberate(
        &self,
        input: &DeliberationInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationResult, DeliberationError> {
        let parallel = self.run_deliberation(input, progress).await?;
        let arbitration = self.arbitrate(input, &parallel, progress).await?;

        Ok(DeliberationResult::new(
            input.topic().as_str(),
            input.kind(),
            parallel.optimist,
            parallel.skeptic,
            arbitration.arbiter,
            Timings {
                parallel_ms: parallel.parallel_ms,
                arbitration_ms: arbitration.arbitration_ms,
                total_ms: arbitration.total_ms,
            },
        ))
    }

    /// Phase 1: run the optimist and the skeptic concurrently.
    ///
    /// Both tasks always run to completion. If either call fails, the failure
    /// that settled first is returned and the other result is discarded.
    /// Responses are parsed only when both calls succeeded.
    pub async fn run_deliberation(
        &self,
        input: &DeliberationInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ParallelOutcome, DeliberationError> {
        let user_prompt =
            PromptTemplate::deliberation_prompt(input.kind(), input.topic().as_str(), input.context());

        let mut requests = Vec::with_capacity(Persona::OPPOSING.len());
        for persona in Persona::OPPOSING {
            requests.push((persona, self.build_request(input, persona, &user_prompt)?));
        }

        info!("Phase 1: Parallel deliberation");
        progress.on_state_change(DeliberationState::ParallelRunning);
        progress.on_phase_start(&Phase::Deliberation, requests.len());

        let started_at = Instant::now();
        let mut join_set = JoinSet::new();

        for (persona, request) in requests {
            let caller = self.caller.clone();
            join_set.spawn(async move {
                let began = Instant::now();
                let outcome = caller.invoke(&request).await;
                (persona, outcome, elapsed_ms(began))
            });
        }

        let mut responses = Vec::with_capacity(2);
        let mut first_error: Option<DeliberationError> = None;

        while let Some(joined) = join_set.join_next().await {
            let response = match joined {
                Ok((persona, outcome, elapsed)) => {
                    progress.on_task_complete(&Phase::Deliberation, persona, outcome.is_success());
                    Self::provider_content(persona, outcome).map(|raw| (persona, raw, elapsed))
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    Err(DeliberationError::TaskFailed(e.to_string()))
                }
            };

            match response {
                Ok(response) => responses.push(response),
                Err(e) => {
                    self.log_failure(&e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    } else {
                        debug!("Discarding later failure: {}", e);
                    }
                }
            }
        }

        progress.on_phase_complete(&Phase::Deliberation);
        let parallel_ms = elapsed_ms(started_at);

        // Provider failures take precedence; extraction runs only once both
        // calls succeeded.
        let parsed = match first_error {
            Some(error) => Err(error),
            None => {
                responses.sort_by_key(|(persona, _, _)| *persona != Persona::Optimist);
                responses
                    .into_iter()
                    .map(|(persona, raw, elapsed)| {
                        let stage = Self::parse_content(persona, raw, elapsed);
                        self.log_stage(persona, &stage);
                        stage
                    })
                    .collect::<Result<Vec<_>, _>>()
            }
        };

        let stages = match parsed {
            Ok(stages) => stages,
            Err(error) => {
                progress.on_state_change(DeliberationState::ParallelFailed);
                return Err(error);
            }
        };

        let outcome = ParallelOutcome::from_stages(stages, parallel_ms, started_at).ok_or_else(
            || DeliberationError::TaskFailed("parallel phase lost a persona".to_string()),
        )?;
        progress.on_state_change(DeliberationState::ParallelSucceeded);
        info!(parallel_ms, "Both personas responded");
        Ok(outcome)
    }

    /// Phase 2: the arbiter weighs both analyses.
    pub async fn arbitrate(
        &self,
        input: &DeliberationInput,
        parallel: &ParallelOutcome,
        progress: &dyn ProgressNotifier,
    ) -> Result<ArbiterOutcome, DeliberationError> {
        let user_prompt = PromptTemplate::arbiter_prompt(
            input.kind(),
            input.topic().as_str(),
            &parallel.optimist.parsed,
            &parallel.skeptic.parsed,
        );
        let request = self.build_request(input, Persona::Arbiter, &user_prompt)?;

        info!("Phase 2: Arbitration");
        progress.on_state_change(DeliberationState::ArbiterRunning);
        progress.on_phase_start(&Phase::Arbitration, 1);

        let began = Instant::now();
        let outcome = self.caller.invoke(&request).await;
        let arbitration_ms = elapsed_ms(began);

        let stage = Self::parse_stage(Persona::Arbiter, outcome, arbitration_ms).and_then(|stage| {
            if !self.config.validate_schema {
                return Ok(stage);
            }
            let missing =
                missing_required_keys(&stage.parsed, input.kind().required_judgment_keys());
            if missing.is_empty() {
                Ok(stage)
            } else {
                Err(DeliberationError::SchemaInvalid {
                    persona: Persona::Arbiter,
                    missing,
                    raw: stage.raw,
                })
            }
        });

        progress.on_task_complete(&Phase::Arbitration, Persona::Arbiter, stage.is_ok());
        progress.on_phase_complete(&Phase::Arbitration);
        self.log_stage(Persona::Arbiter, &stage);

        match stage {
            Ok(arbiter) => {
                progress.on_state_change(DeliberationState::Complete);
                Ok(ArbiterOutcome {
                    arbiter,
                    arbitration_ms,
                    total_ms: elapsed_ms(parallel.started_at),
                })
            }
            Err(e) => {
                progress.on_state_change(DeliberationState::ArbiterFailed);
                Err(e)
            }
        }
    }

    fn build_request(
        &self,
        input: &DeliberationInput,
        persona: Persona,
        user_prompt: &str,
    ) -> Result<AgentRequest, DeliberationError> {
        let settings = self.config.persona(persona);
        let request = AgentRequest::builder(
            PromptTemplate::system_prompt(input.kind(), persona),
            user_prompt,
        )
        .model(settings.model.clone())
        .temperature(settings.temperature)
        .max_output_tokens(settings.max_output_tokens)
        .retry_policy(self.config.retry_policy)
        .timeout(self.config.timeout)
        .build()?;
        Ok(request)
    }

    fn parse_stage(
        persona: Persona,
        outcome: AgentOutcome,
        elapsed_ms: u64,
    ) -> Result<StageOutput, DeliberationError> {
        let raw = Self::provider_content(persona, outcome)?;
        Self::parse_content(persona, raw, elapsed_ms)
    }

    fn provider_content(persona: Persona, outcome: AgentOutcome) -> Result<String, DeliberationError> {
        outcome
            .into_result()
            .map_err(|failure| DeliberationError::Provider { persona, failure })
    }

    fn parse_content(
        persona: Persona,
        raw: String,
        elapsed_ms: u64,
    ) -> Result<StageOutput, DeliberationError> {
        match extract_value(&raw) {
            Some(parsed) => Ok(StageOutput::new(persona, raw, parsed, elapsed_ms)),
            None => Err(DeliberationError::Unparseable { persona, raw }),
        }
    }

    fn log_stage(&self, persona: Persona, stage: &Result<StageOutput, DeliberationError>) {
        match stage {
            Ok(stage) => {
                info!(persona = persona.as_str(), elapsed_ms = stage.elapsed_ms, "Stage completed");
                self.logger.log(TranscriptEvent::new(
                    "stage_completed",
                    json!({
                        "persona": persona.as_str(),
                        "elapsed_ms": stage.elapsed_ms,
                        "parsed": stage.parsed,
                    }),
                ));
            }
            Err(e) => self.log_failure(e),
        }
    }

    fn log_failure(&self, error: &DeliberationError) {
        let persona = error.persona().map(|p| p.as_str());
        warn!(persona, code = error.code(), "Stage failed: {}", error);
        self.logger.log(TranscriptEvent::new(
            "stage_failed",
            json!({
                "persona": persona,
                "code": error.code(),
                "message": error.to_string(),
            }),
        ));
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    since.elapsed().as_millis() as u64
}
