//! scrutineer binary: validate candidate batches from the command line.
//!
//! Reads a batch from a file or stdin, runs it through the built-in
//! validators, and prints the summary as JSON on stdout. The exit code
//! follows the verdict: 0 when every validation passed, 1 otherwise.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use scrutineer_core::{
    Orchestrator, OrchestratorConfig, ValidationCandidate, ValidatorRegistry, Verdict,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Validate candidate batches against the registered validators
#[derive(Parser, Debug)]
#[command(name = "scrutineer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Batch file: a JSON or YAML array of candidates ("-" for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Wall-clock bound on the run (e.g. "60s", "2m")
    #[arg(long, value_parser = humantime::parse_duration, default_value = "60s")]
    timeout: Duration,

    /// Cap on validations in flight within the run
    #[arg(long, default_value_t = scrutineer_core::DEFAULT_MAX_CONCURRENT)]
    max_concurrent: usize,

    /// Pretty-print the summary instead of emitting one line
    #[arg(long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays a clean JSON summary.
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let candidates = read_batch(&args.input)?;
    tracing::debug!(candidates = candidates.len(), "loaded batch");

    let config = OrchestratorConfig {
        timeout: args.timeout,
        max_concurrent: args.max_concurrent,
    };
    let orchestrator = Orchestrator::new(ValidatorRegistry::with_defaults(), config);

    let summary = orchestrator.validate_all(&candidates).await?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{rendered}");

    Ok(match summary.result {
        Verdict::Success => ExitCode::SUCCESS,
        Verdict::Failure => ExitCode::FAILURE,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchFormat {
    Json,
    Yaml,
}

/// Pick the batch format from the file extension. Everything that is not
/// `.yaml`/`.yml` parses as JSON.
fn batch_format(input: &Path) -> BatchFormat {
    match input.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => BatchFormat::Yaml,
        _ => BatchFormat::Json,
    }
}

fn parse_batch(raw: &str, format: BatchFormat) -> Result<Vec<ValidationCandidate>> {
    match format {
        BatchFormat::Json => serde_json::from_str(raw).context("not a JSON candidate batch"),
        BatchFormat::Yaml => serde_yaml::from_str(raw).context("not a YAML candidate batch"),
    }
}

/// Read a candidate batch from a file, or from stdin when the path is `-`.
fn read_batch(input: &Path) -> Result<Vec<ValidationCandidate>> {
    if input == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read stdin")?;
        return parse_batch(&raw, BatchFormat::Json);
    }

    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    parse_batch(&raw, batch_format(input))
        .with_context(|| format!("failed to parse {}", input.display()))
}
