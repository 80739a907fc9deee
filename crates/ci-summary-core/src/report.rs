//! Markdown step summary generation.
//!
//! [`SummaryGenerator::generate`] never fails: problems reading individual
//! artifacts either become [`SummaryWarning`]s or, for anything else, an
//! error section in the rendered report. Only writing the result to disk
//! ([`SummaryOutcome::write_markdown`]) returns an error.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SummaryError, SummaryWarning};
use crate::layout::ArtifactLayout;
use crate::obs::{
    emit_stage_evaluated, emit_summary_error, emit_summary_started, emit_summary_warning,
    emit_summary_written, SummarySpan,
};
use crate::parse::{
    read_coverage, read_lint_summary, read_test_summary, CoverageRecord, LintSummary, TestSummary,
};
use crate::scan::{collect_build_artifacts, ArtifactSet, BuildArtifact};
use crate::stage::{Stage, StageRow, StageStatus};

/// First line of every summary.
pub const TITLE: &str = "# ☕ Java CI/CD Summary";

/// Line printed once the summary has been written.
pub const SUCCESS_MESSAGE: &str = "✅ Java CI/CD summary generated successfully";

const STATUS_HEADING: &str = "## 📊 Pipeline Status";
const TABLE_HEADER: &str = "| Stage | Status | Details |";
const TABLE_SEPARATOR: &str = "|-------|--------|---------|";
const ARTIFACTS_HEADING: &str = "## 📦 Generated Artifacts";
const ERROR_HEADING: &str = "## ❌ Error generating summary";

/// Append-only list of markdown lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined with `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Machine-readable view of a summary run, written as JSON on request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineSummary {
    pub generated_at: DateTime<Utc>,
    pub artifacts_root: PathBuf,
    pub artifacts_found: bool,
    pub stages: Vec<StageRow>,
    pub tests: Option<TestSummary>,
    pub lint: Option<LintSummary>,
    pub coverage: Option<CoverageRecord>,
    pub artifacts: Vec<BuildArtifact>,
    pub security_scans: Vec<String>,
    pub warnings: Vec<SummaryWarning>,
    pub error: Option<String>,
}

impl PipelineSummary {
    fn empty(generated_at: DateTime<Utc>, artifacts_root: PathBuf) -> Self {
        Self {
            generated_at,
            artifacts_root,
            artifacts_found: false,
            stages: Vec::new(),
            tests: None,
            lint: None,
            coverage: None,
            artifacts: Vec::new(),
            security_scans: Vec::new(),
            warnings: Vec::new(),
            error: None,
        }
    }

    /// Status of `stage`, if its row was rendered.
    pub fn stage_status(&self, stage: Stage) -> Option<StageStatus> {
        self.stages
            .iter()
            .find(|row| row.stage == stage)
            .map(|row| row.status)
    }

    fn warn(&mut self, warning: SummaryWarning) {
        emit_summary_warning(&warning);
        self.warnings.push(warning);
    }
}

/// Rendered report plus the facts it was built from.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub report: Report,
    pub summary: PipelineSummary,
}

impl SummaryOutcome {
    pub fn markdown(&self) -> String {
        self.report.render()
    }

    pub fn warnings(&self) -> &[SummaryWarning] {
        &self.summary.warnings
    }

    /// Message shown in the error section, if stage evaluation aborted.
    pub fn error(&self) -> Option<&str> {
        self.summary.error.as_deref()
    }

    /// Write the markdown to `path`, replacing any existing content.
    pub fn write_markdown(&self, path: &Path) -> Result<usize> {
        let content = self.markdown();
        write_file(path, &content)?;
        Ok(content.len())
    }

    /// Write the pretty-printed JSON summary to `path`.
    pub fn write_json(&self, path: &Path) -> Result<usize> {
        let content = serde_json::to_string_pretty(&self.summary)?;
        write_file(path, &content)?;
        Ok(content.len())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| SummaryError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    emit_summary_written(path, content.len());
    Ok(())
}

/// Builds the step summary for one artifacts root.
#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    layout: ArtifactLayout,
}

impl SummaryGenerator {
    pub fn new(layout: ArtifactLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    /// Generate the summary, stamping the footer with `now`.
    ///
    /// The footer is always the last two lines, after the error section
    /// when there is one.
    pub fn generate(&self, now: DateTime<Utc>) -> SummaryOutcome {
        let root = self.layout.root();
        let _span = SummarySpan::enter(root);

        let mut report = Report::new();
        let mut summary = PipelineSummary::empty(now, root.to_path_buf());
        report.push(TITLE);
        report.blank();

        summary.artifacts_found = root.exists();
        emit_summary_started(root, summary.artifacts_found);

        if summary.artifacts_found {
            if let Err(e) = self.render_artifacts(&mut report, &mut summary) {
                emit_summary_error(&e);
                report.push(ERROR_HEADING);
                report.push(format!("Error: {}", e));
                summary.error = Some(e.to_string());
            }
        } else {
            report.push("## ⚠️ No artifacts found");
            report.push("No build artifacts were generated or downloaded.");
            report.blank();
        }

        report.push("---");
        report.push(format!(
            "*Generated on {}*",
            now.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));

        SummaryOutcome { report, summary }
    }

    fn render_artifacts(&self, report: &mut Report, summary: &mut PipelineSummary) -> Result<()> {
        report.push(STATUS_HEADING);
        report.blank();

        let set = ArtifactSet::probe(&self.layout)?;
        summary.security_scans = set.security_scans.clone();

        if set.has_build {
            let scan = collect_build_artifacts(&self.layout.package_dir());
            for warning in scan.warnings {
                summary.warn(warning);
            }
            summary.artifacts = scan.artifacts;
        }

        report.push(TABLE_HEADER);
        report.push(TABLE_SEPARATOR);

        // Rows are pushed one at a time so a later read failure keeps earlier rows.
        let row = self.tests_row(&set, summary)?;
        push_row(report, summary, row);
        let row = self.lint_row(&set, summary)?;
        push_row(report, summary, row);
        let row = build_row(&set, &summary.artifacts);
        push_row(report, summary, row);
        push_row(report, summary, security_row(&set));
        report.blank();

        let coverage_csv = self.layout.coverage_csv();
        if coverage_csv.exists() {
            match read_coverage(&coverage_csv) {
                Ok(record) => {
                    if let Some(headline) = record.headline() {
                        report.push(format!("## 📈 {}", headline));
                        report.blank();
                    }
                    summary.coverage = Some(record);
                }
                Err(warning) => summary.warn(warning),
            }
        }

        if !summary.artifacts.is_empty() {
            report.push(ARTIFACTS_HEADING);
            for artifact in &summary.artifacts {
                report.push(artifact.to_markdown_item());
            }
            report.blank();
        }

        Ok(())
    }

    fn tests_row(&self, set: &ArtifactSet, summary: &mut PipelineSummary) -> Result<StageRow> {
        let path = self.layout.test_summary_file();
        if !(set.has_tests && path.exists()) {
            return Ok(StageRow::not_found(Stage::Tests));
        }

        let tests = read_test_summary(&path)?;
        let row = StageRow::new(
            Stage::Tests,
            StageStatus::from_passed(tests.passed()),
            tests.details(),
        );
        summary.tests = Some(tests);
        Ok(row)
    }

    fn lint_row(&self, set: &ArtifactSet, summary: &mut PipelineSummary) -> Result<StageRow> {
        let path = self.layout.lint_summary_file();
        if !(set.has_lint && path.exists()) {
            return Ok(StageRow::not_found(Stage::Linting));
        }

        let lint = read_lint_summary(&path)?;
        let row = StageRow::new(
            Stage::Linting,
            StageStatus::from_passed(lint.passed),
            lint.details(),
        );
        summary.lint = Some(lint);
        Ok(row)
    }
}

fn push_row(report: &mut Report, summary: &mut PipelineSummary, row: StageRow) {
    emit_stage_evaluated(&row);
    report.push(row.to_markdown_row());
    summary.stages.push(row);
}

fn build_row(set: &ArtifactSet, artifacts: &[BuildArtifact]) -> StageRow {
    if set.has_build {
        StageRow::new(
            Stage::Build,
            StageStatus::Completed,
            format!("{} artifact(s)", artifacts.len()),
        )
    } else {
        StageRow::not_found(Stage::Build)
    }
}

fn security_row(set: &ArtifactSet) -> StageRow {
    let status = if set.has_security() {
        StageStatus::Completed
    } else {
        StageStatus::NotFound
    };
    StageRow::new(
        Stage::Security,
        status,
        format!("{} scan(s)", set.security_scans.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .expect("parse RFC3339")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_report_render_joins_lines() {
        let mut report = Report::new();
        report.push("# Title");
        report.blank();
        report.push("body");
        assert_eq!(report.lines().len(), 3);
        assert_eq!(report.render(), "# Title\n\nbody");
    }

    #[test]
    fn test_missing_root_renders_notice_and_footer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generator = SummaryGenerator::new(ArtifactLayout::new(dir.path().join("artifacts")));

        let outcome = generator.generate(fixed_now());
        let expected = "# ☕ Java CI/CD Summary\n\n## ⚠️ No artifacts found\nNo build artifacts were generated or downloaded.\n\n---\n*Generated on 2026-01-01T00:00:00.000Z*";
        assert_eq!(outcome.markdown(), expected);
        assert!(!outcome.summary.artifacts_found);
        assert!(outcome.warnings().is_empty());
        assert_eq!(outcome.error(), None);
    }

    #[test]
    fn test_empty_root_renders_not_found_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generator = SummaryGenerator::new(ArtifactLayout::new(dir.path()));

        let outcome = generator.generate(fixed_now());
        let expected = "# ☕ Java CI/CD Summary\n\n## 📊 Pipeline Status\n\n| Stage | Status | Details |\n|-------|--------|---------|\n| 🧪 Tests | ⚠️ Not Found | - |\n| 🔍 Linting | ⚠️ Not Found | - |\n| 📦 Build | ⚠️ Not Found | - |\n| 🔒 Security | ⚠️ Not Found | 0 scan(s) |\n\n---\n*Generated on 2026-01-01T00:00:00.000Z*";
        assert_eq!(outcome.markdown(), expected);
        assert_eq!(
            outcome.summary.stage_status(Stage::Security),
            Some(StageStatus::NotFound)
        );
    }

    #[test]
    fn test_root_that_is_a_file_renders_error_section_then_footer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("artifacts");
        std::fs::write(&root, "not a directory").expect("write file");

        let outcome = SummaryGenerator::new(ArtifactLayout::new(&root)).generate(fixed_now());
        let lines = outcome.report.lines();
        let n = lines.len();

        assert!(outcome.error().is_some());
        assert_eq!(lines[n - 4], "## ❌ Error generating summary");
        assert!(lines[n - 3].starts_with("Error: failed to list"));
        assert_eq!(lines[n - 2], "---");
        assert_eq!(lines[n - 1], "*Generated on 2026-01-01T00:00:00.000Z*");
        // heading pushed before the failure is kept
        assert!(lines.contains(&"## 📊 Pipeline Status".to_string()));
    }

    #[test]
    fn test_test_results_dir_without_summary_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ArtifactLayout::new(dir.path());
        std::fs::create_dir_all(layout.test_results_dir()).expect("mkdir");

        let outcome = SummaryGenerator::new(layout).generate(fixed_now());
        assert_eq!(
            outcome.summary.stage_status(Stage::Tests),
            Some(StageStatus::NotFound)
        );
        assert!(outcome.summary.tests.is_none());
    }

    #[test]
    fn test_summary_json_contains_stage_statuses() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ArtifactLayout::new(dir.path());
        std::fs::create_dir_all(dir.path().join("grype-results")).expect("mkdir");

        let outcome = SummaryGenerator::new(layout).generate(fixed_now());
        let raw = serde_json::to_value(&outcome.summary).expect("serialize summary");
        assert_eq!(raw["artifacts_found"], true);
        assert_eq!(raw["stages"][3]["stage"], "security");
        assert_eq!(raw["stages"][3]["status"], "completed");
        assert_eq!(raw["security_scans"][0], "grype-results");
    }
}
