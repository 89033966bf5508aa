//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tribunal_domain::AnalysisKind;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Both opposing analyses, the judgment and timings
    Full,
    /// Only the arbiter's judgment
    Judgment,
    /// JSON output
    Json,
}

impl From<OutputFormat> for tribunal_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => tribunal_domain::OutputFormat::Full,
            OutputFormat::Judgment => tribunal_domain::OutputFormat::Judgment,
            OutputFormat::Json => tribunal_domain::OutputFormat::Json,
        }
    }
}

/// Kind of analysis to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KindArg {
    /// Validate a business idea's main pain point
    #[default]
    DeepAnalysis,
    /// Evaluate a niche market
    NicheDeepAnalysis,
    /// Draft a product specification
    ProductSpec,
}

impl From<KindArg> for AnalysisKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::DeepAnalysis => AnalysisKind::DeepAnalysis,
            KindArg::NicheDeepAnalysis => AnalysisKind::NicheDeepAnalysis,
            KindArg::ProductSpec => AnalysisKind::ProductSpec,
        }
    }
}

/// CLI arguments for tribunal
#[derive(Parser, Debug)]
#[command(name = "tribunal")]
#[command(author, version, about = "Adversarial deliberation - an optimist and a skeptic argue, an arbiter decides")]
#[command(long_about = r#"
Tribunal runs a structured debate between text-generation personas.

The process has two phases:
1. Deliberation: an optimist and a skeptic analyze the topic concurrently
2. Arbitration: an arbiter weighs both analyses and returns a JSON judgment

Configuration files are loaded from (in priority order):
1. TRIBUNAL_* environment variables (e.g. TRIBUNAL_RETRY__MAX_ATTEMPTS=5)
2. --config <path>     Explicit config file
3. ./tribunal.toml     Project-level config
4. ~/.config/tribunal/config.toml   Global config

Example:
  tribunal "AI meal planning app"
  tribunal --kind niche-deep-analysis --context research.json "Pet insurance for reptiles"
  tribunal -o json --transcript run.jsonl "Invoice automation for freelancers"
"#)]
pub struct Cli {
    /// The topic to deliberate on
    #[arg(required_unless_present = "show_config")]
    pub topic: Option<String>,

    /// Kind of analysis
    #[arg(short, long, value_enum, default_value = "deep-analysis")]
    pub kind: KindArg,

    /// JSON file with supporting research data for both personas
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Output format (defaults to the configured format, then full)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Append a JSONL transcript of the deliberation to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write diagnostic logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
