//! Extraction of counts from the small text formats uploaded by the pipeline.
//!
//! - `test-summary.txt`: free text containing `Total Tests: N` and `Failed Tests: N`
//! - `lint-summary.txt`: free text containing `PASSED` on success and `Errors: N`
//! - `jacoco.csv`: JaCoCo CSV report, header row followed by data rows
//!
//! Files are decoded lossily: invalid UTF-8 becomes U+FFFD instead of an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Result, SummaryError, SummaryWarning};

/// Column index of `LINE_MISSED` in a JaCoCo CSV row.
pub const JACOCO_LINE_MISSED_COLUMN: usize = 7;

/// Column index of `LINE_COVERED` in a JaCoCo CSV row.
pub const JACOCO_LINE_COVERED_COLUMN: usize = 8;

// ASCII digit classes; `\d` would also match other Unicode digits.
fn total_tests_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Total Tests: ([0-9]+)").expect("static regex"))
}

fn failed_tests_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Failed Tests: ([0-9]+)").expect("static regex"))
}

fn lint_errors_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Errors: ([0-9]+)").expect("static regex"))
}

/// Digits of the first capture group of `re` in `content`, verbatim.
fn capture_digits(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Test counts from `test-summary.txt`.
///
/// Counts are kept as the captured digit text so that padded (`007`) or
/// very large values render exactly as written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TestSummary {
    /// `None` when the file has no `Total Tests:` line.
    pub total_tests: Option<String>,

    /// `None` when the file has no `Failed Tests:` line.
    pub failed_tests: Option<String>,
}

impl TestSummary {
    pub fn parse(content: &str) -> Self {
        Self {
            total_tests: capture_digits(total_tests_re(), content),
            failed_tests: capture_digits(failed_tests_re(), content),
        }
    }

    /// Passed only when the failed count is exactly `0`.
    pub fn passed(&self) -> bool {
        self.failed_tests.as_deref() == Some("0")
    }

    /// Table details, e.g. `42 tests, 0 failed`. Unknown counts render as `?`.
    pub fn details(&self) -> String {
        format!(
            "{} tests, {} failed",
            self.total_tests.as_deref().unwrap_or("?"),
            self.failed_tests.as_deref().unwrap_or("?")
        )
    }
}

/// Lint outcome from `lint-summary.txt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LintSummary {
    pub passed: bool,

    /// Captured `Errors:` digits, `0` when absent.
    pub error_count: String,
}

impl Default for LintSummary {
    fn default() -> Self {
        Self {
            passed: false,
            error_count: "0".to_string(),
        }
    }
}

impl LintSummary {
    pub fn parse(content: &str) -> Self {
        Self {
            passed: content.contains("PASSED"),
            error_count: capture_digits(lint_errors_re(), content)
                .unwrap_or_else(|| "0".to_string()),
        }
    }

    pub fn details(&self) -> String {
        format!("{} errors", self.error_count)
    }
}

/// Line coverage taken from the first data row of a JaCoCo CSV.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageRecord {
    pub lines_missed: u64,
    pub lines_covered: u64,
}

impl CoverageRecord {
    /// Parse the second line of `content`.
    ///
    /// Returns `None` when there is no data row or it has fewer than nine
    /// fields. Non-numeric cells count as zero.
    pub fn parse_csv(content: &str) -> Option<Self> {
        let row = content.split('\n').nth(1)?;
        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() <= JACOCO_LINE_COVERED_COLUMN {
            return None;
        }

        Some(Self {
            lines_missed: parse_leading_count(fields[JACOCO_LINE_MISSED_COLUMN]),
            lines_covered: parse_leading_count(fields[JACOCO_LINE_COVERED_COLUMN]),
        })
    }

    /// Widened so the sum of two `u64` cells cannot overflow.
    pub fn total_lines(&self) -> u128 {
        u128::from(self.lines_missed) + u128::from(self.lines_covered)
    }

    /// Rounded percentage of covered lines; `None` when there are no lines.
    pub fn percent(&self) -> Option<u64> {
        let total = self.total_lines();
        if total == 0 {
            return None;
        }
        let ratio = (self.lines_covered as f64 * 100.0) / total as f64;
        Some(ratio.round() as u64)
    }

    /// Heading text, e.g. `Coverage: 90% (90/100 lines)`.
    pub fn headline(&self) -> Option<String> {
        self.percent().map(|percent| {
            format!(
                "Coverage: {}% ({}/{} lines)",
                percent,
                self.lines_covered,
                self.total_lines()
            )
        })
    }
}

/// Leading-digit count parse: skips leading whitespace and an optional `+`,
/// reads digits up to the first non-digit, and yields 0 when there are none.
///
/// Unlike JavaScript's `parseInt`, a leading `-` is not accepted: negative
/// cells count as 0, as do digit runs too large for `u64`.
fn parse_leading_count(cell: &str) -> u64 {
    let trimmed = cell.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().unwrap_or(0)
}

fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read and parse `test-summary.txt`.
pub fn read_test_summary(path: &Path) -> Result<TestSummary> {
    let content = read_lossy(path).map_err(|e| SummaryError::read(path, e))?;
    Ok(TestSummary::parse(&content))
}

/// Read and parse `lint-summary.txt`.
pub fn read_lint_summary(path: &Path) -> Result<LintSummary> {
    let content = read_lossy(path).map_err(|e| SummaryError::read(path, e))?;
    Ok(LintSummary::parse(&content))
}

/// Read and parse a JaCoCo CSV. Failures are reported as warnings only.
pub fn read_coverage(path: &Path) -> std::result::Result<CoverageRecord, SummaryWarning> {
    let content = read_lossy(path).map_err(|e| SummaryWarning::CoverageUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    CoverageRecord::parse_csv(&content).ok_or_else(|| SummaryWarning::CoverageMalformed {
        path: path.to_path_buf(),
        reason: format!(
            "expected a data row with at least {} fields",
            JACOCO_LINE_COVERED_COLUMN + 1
        ),
    })
}
