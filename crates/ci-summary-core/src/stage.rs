//! Pipeline stage rows of the status table.

use serde::{Deserialize, Serialize};

/// Pipeline stages summarised in the status table, in row order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Unit/integration test run (`test-summary`, `test-results`)
    Tests,

    /// Custom lint job (`custom-lint-summary`)
    Linting,

    /// Packaging job (`java-package`)
    Build,

    /// Trivy/Grype/other security scans
    Security,
}

impl Stage {
    /// Get the stage name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Tests => "tests",
            Stage::Linting => "linting",
            Stage::Build => "build",
            Stage::Security => "security",
        }
    }

    /// Label shown in the first table column.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Tests => "🧪 Tests",
            Stage::Linting => "🔍 Linting",
            Stage::Build => "📦 Build",
            Stage::Security => "🔒 Security",
        }
    }
}

/// Outcome of a stage as shown in the status column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Passed,
    Failed,
    Completed,
    NotFound,
}

impl StageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StageStatus::Passed => "✅ PASSED",
            StageStatus::Failed => "❌ FAILED",
            StageStatus::Completed => "✅ Completed",
            StageStatus::NotFound => "⚠️ Not Found",
        }
    }

    /// `Passed` when `passed`, otherwise `Failed`.
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            StageStatus::Passed
        } else {
            StageStatus::Failed
        }
    }
}

/// One row of the status table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageRow {
    pub stage: Stage,
    pub status: StageStatus,
    pub details: String,
}

impl StageRow {
    pub fn new(stage: Stage, status: StageStatus, details: impl Into<String>) -> Self {
        Self {
            stage,
            status,
            details: details.into(),
        }
    }

    /// Row for a stage whose summary file was not uploaded.
    pub fn not_found(stage: Stage) -> Self {
        Self::new(stage, StageStatus::NotFound, "-")
    }

    /// Render as a markdown table row.
    pub fn to_markdown_row(&self) -> String {
        format!(
            "| {} | {} | {} |",
            self.stage.label(),
            self.status.label(),
            self.details
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Tests.name(), "tests");
        assert_eq!(Stage::Linting.name(), "linting");
        assert_eq!(Stage::Build.name(), "build");
        assert_eq!(Stage::Security.name(), "security");
    }

    #[test]
    fn test_status_from_passed() {
        assert_eq!(StageStatus::from_passed(true), StageStatus::Passed);
        assert_eq!(StageStatus::from_passed(false), StageStatus::Failed);
    }

    #[test]
    fn test_not_found_row() {
        let row = StageRow::not_found(Stage::Tests);
        assert_eq!(row.to_markdown_row(), "| 🧪 Tests | ⚠️ Not Found | - |");
    }

    #[test]
    fn test_completed_row() {
        let row = StageRow::new(Stage::Build, StageStatus::Completed, "2 artifact(s)");
        assert_eq!(row.to_markdown_row(), "| 📦 Build | ✅ Completed | 2 artifact(s) |");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let raw = serde_json::to_value(StageStatus::NotFound).expect("serialize");
        assert_eq!(raw, "not_found");
    }
}
