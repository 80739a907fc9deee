//! Structured tracing events emitted while generating a summary.

use chrono::Utc;
use ci_summary_core::{
    emit_stage_evaluated, emit_summary_error, emit_summary_started, emit_summary_warning,
    emit_summary_written, ArtifactLayout, Stage, StageRow, StageStatus, SummaryGenerator,
    SummarySpan, SummaryWarning,
};
use std::path::{Path, PathBuf};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn summary_started_logs_root() {
    emit_summary_started(Path::new("artifacts"), true);
    assert!(logs_contain("summary.started"));
    assert!(logs_contain("artifacts_found=true"));
}

#[traced_test]
#[test]
fn stage_evaluated_logs_stage_name() {
    let row = StageRow::new(Stage::Tests, StageStatus::Passed, "42 tests, 0 failed");
    emit_stage_evaluated(&row);
    assert!(logs_contain("stage.evaluated"));
    assert!(logs_contain("tests"));
}

#[traced_test]
#[test]
fn summary_warning_logs_path_and_reason() {
    emit_summary_warning(&SummaryWarning::CoverageUnreadable {
        path: PathBuf::from("artifacts/coverage-report/jacoco.csv"),
        reason: "permission denied".to_string(),
    });
    assert!(logs_contain("summary.warning"));
    assert!(logs_contain("jacoco.csv"));
    assert!(logs_contain("permission denied"));
}

#[traced_test]
#[test]
fn summary_error_and_written_events() {
    emit_summary_error(&"disk on fire");
    emit_summary_written(Path::new("/tmp/summary.md"), 512);
    assert!(logs_contain("summary.error"));
    assert!(logs_contain("disk on fire"));
    assert!(logs_contain("summary.written"));
}

#[traced_test]
#[test]
fn generate_runs_inside_summary_span() {
    let dir = tempfile::tempdir().expect("tempdir");
    let _span = SummarySpan::enter(dir.path());
    let outcome = SummaryGenerator::new(ArtifactLayout::new(dir.path().join("missing")))
        .generate(Utc::now());
    assert!(!outcome.summary.artifacts_found);
    assert!(logs_contain("ci_summary.run"));
    assert!(logs_contain("artifacts_found=false"));
}
