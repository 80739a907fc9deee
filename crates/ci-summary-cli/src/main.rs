//! ci-summary - Java CI/CD step summary generator
//!
//! Reads the artifacts downloaded by the summary job and writes a markdown
//! overview to the step summary file (`GITHUB_STEP_SUMMARY` on GitHub Actions).
//!
//! Problems with individual artifacts are rendered into the summary; the
//! process only exits non-zero when an output file cannot be written.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};

use ci_summary_core::{
    ArtifactLayout, SummaryGenerator, SummaryOutcome, DEFAULT_ARTIFACTS_DIR, SUCCESS_MESSAGE,
};

#[derive(Parser, Debug)]
#[command(name = "ci-summary")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a Java CI/CD step summary from pipeline artifacts", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Directory holding the downloaded pipeline artifacts
    #[arg(long, env = "CI_SUMMARY_ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts_dir: PathBuf,

    /// Markdown output file, replaced on every run
    #[arg(short, long, env = "GITHUB_STEP_SUMMARY")]
    output: PathBuf,

    /// Optional machine-readable summary (JSON)
    #[arg(long, env = "CI_SUMMARY_JSON")]
    summary_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    ci_summary_core::init_tracing(cli.json, level);

    run(&cli)?;
    println!("{}", SUCCESS_MESSAGE);
    Ok(())
}

fn run(cli: &Cli) -> Result<SummaryOutcome> {
    let generator = SummaryGenerator::new(ArtifactLayout::new(&cli.artifacts_dir));
    let outcome = generator.generate(Utc::now());

    outcome
        .write_markdown(&cli.output)
        .with_context(|| format!("Failed to write step summary to {:?}", cli.output))?;

    if let Some(path) = &cli.summary_json {
        outcome
            .write_json(path)
            .with_context(|| format!("Failed to write JSON summary to {:?}", path))?;
    }

    info!(
        warnings = outcome.warnings().len(),
        errored = outcome.error().is_some(),
        "Step summary complete"
    );
    Ok(outcome)
}
