//! Structured log events for a summary run.
//!
//! Every event carries an `event` field (`summary.started`, `stage.evaluated`,
//! ...) so JSON logs can be filtered without parsing messages.

use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::error::SummaryWarning;
use crate::stage::StageRow;

/// RAII guard that tags all events of one run with the artifacts root.
pub struct SummarySpan {
    _span: tracing::span::EnteredSpan,
}

impl SummarySpan {
    pub fn enter(artifacts_root: &Path) -> Self {
        let span = tracing::info_span!("ci_summary.run", artifacts_root = %artifacts_root.display());
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: generation started; `artifacts_found` is false when the root is missing.
pub fn emit_summary_started(artifacts_root: &Path, artifacts_found: bool) {
    info!(
        event = "summary.started",
        artifacts_root = %artifacts_root.display(),
        artifacts_found = artifacts_found,
    );
}

/// Emit event: a status table row was computed.
pub fn emit_stage_evaluated(row: &StageRow) {
    debug!(
        event = "stage.evaluated",
        stage = row.stage.name(),
        status = ?row.status,
        details = %row.details,
    );
}

/// Emit event: a recoverable problem degraded the report (warning level).
pub fn emit_summary_warning(warning: &SummaryWarning) {
    warn!(
        event = "summary.warning",
        path = %warning.path().display(),
        reason = %warning.reason(),
    );
}

/// Emit event: stage evaluation aborted and an error section was rendered.
pub fn emit_summary_error(error: &dyn std::fmt::Display) {
    error!(event = "summary.error", error = %error);
}

/// Emit event: an output file was written.
pub fn emit_summary_written(path: &Path, bytes: usize) {
    info!(event = "summary.written", path = %path.display(), bytes = bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_span_create() {
        let _span = SummarySpan::enter(Path::new("artifacts"));
    }
}
