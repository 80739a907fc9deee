//! ci-summary core library
//!
//! Scans the artifacts downloaded by a Java CI/CD workflow and renders a
//! markdown step summary:
//! - probes which stages (tests, lint, build, security) left artifacts
//! - extracts counts from test/lint summaries and the JaCoCo CSV
//! - lists packaged archives with their sizes

pub mod error;
pub mod layout;
pub mod obs;
pub mod parse;
pub mod report;
pub mod scan;
pub mod stage;
pub mod telemetry;

pub use error::{Result, SummaryError, SummaryWarning};
pub use layout::{ArtifactLayout, DEFAULT_ARTIFACTS_DIR};
pub use obs::{
    emit_stage_evaluated, emit_summary_error, emit_summary_started, emit_summary_warning,
    emit_summary_written, SummarySpan,
};
pub use parse::{CoverageRecord, LintSummary, TestSummary};
pub use report::{
    PipelineSummary, Report, SummaryGenerator, SummaryOutcome, SUCCESS_MESSAGE, TITLE,
};
pub use scan::{collect_build_artifacts, ArtifactSet, BuildArtifact, BuildArtifactScan};
pub use stage::{Stage, StageRow, StageStatus};
pub use telemetry::init_tracing;

/// ci-summary version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
