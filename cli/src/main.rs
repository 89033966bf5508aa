//! CLI entrypoint for tribunal
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde_json::{Value, json};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tribunal_application::{ProgressNotifier, RunDeliberationUseCase};
use tribunal_domain::{DeliberationInput, OutputFormat, Topic};
use tribunal_infrastructure::{ConfigLoader, FileConfig, JsonlTranscriptLogger, OpenAiGateway};
use tribunal_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting tribunal");

    // === Configuration ===
    let file_config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", ConfigLoader::render(&file_config)?);
        return Ok(ExitCode::SUCCESS);
    }

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let config = file_config
        .to_deliberation_config()
        .context("Invalid configuration")?;

    // === Input ===
    let topic = Topic::try_new(cli.topic.clone().unwrap_or_default())?;
    let context = match &cli.context {
        Some(path) => read_context(path)?,
        None => json!({}),
    };
    let input = DeliberationInput::new(topic, context).with_kind(cli.kind.into());

    // === Dependency Injection ===
    let api_key = file_config.provider.api_key();
    if api_key.is_none() {
        warn!(
            "{} is not set; sending requests without an API key",
            file_config.provider.api_key_env
        );
    }
    let gateway = Arc::new(OpenAiGateway::new(
        &file_config.provider.base_url,
        api_key,
        config.timeout,
    )?);

    let mut use_case = RunDeliberationUseCase::new(gateway).with_config(config);
    if let Some(path) = &cli.transcript {
        let logger = JsonlTranscriptLogger::open(path)
            .with_context(|| format!("Cannot open transcript {}", path.display()))?;
        info!("Writing transcript to {}", logger.path().display());
        use_case = use_case.with_transcript_logger(Arc::new(logger));
    }

    if !cli.quiet {
        eprintln!();
        eprintln!("Topic: {}", input.topic());
        eprintln!(
            "Analysis: {} (model {})",
            input.kind().display_name(),
            use_case.config().arbiter.model
        );
        eprintln!();
    }

    // === Run ===
    let result = if cli.quiet {
        use_case.execute(input.clone()).await
    } else {
        let progress: Box<dyn ProgressNotifier> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        use_case
            .execute_with_progress(input.clone(), progress.as_ref())
            .await
    };

    let mut result = match result {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    result.stamp_metadata("data_sources", json!(input.data_sources()));
    result.stamp_metadata("generated_at", json!(chrono::Utc::now().to_rfc3339()));
    result.stamp_metadata("analysis_kind", json!(input.kind().as_str()));

    // === Output ===
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(file_config.output.format)
        .unwrap_or_default();

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Judgment => ConsoleFormatter::format_judgment_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    println!("{}", output);

    Ok(ExitCode::SUCCESS)
}

/// Diagnostics go to stderr, or to a daily rolling file when `log_dir` is set.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "tribunal.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn read_context(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read context file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Context file {} is not valid JSON", path.display()))
}
