//! Expected locations of pipeline artifacts under the artifacts root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default artifacts root, relative to the working directory.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Name substrings that mark a security scan upload.
pub const SECURITY_MARKERS: [&str; 3] = ["trivy", "grype", "security"];

/// Extensions recognised as Java build outputs.
pub const BUILD_EXTENSIONS: [&str; 3] = [".jar", ".war", ".ear"];

/// Artifact layout rooted at a single directory.
///
/// Every probe target is a fixed path relative to `root`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactLayout {
    /// Artifacts root directory.
    pub root: PathBuf,
}

impl ArtifactLayout {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn test_summary_dir(&self) -> PathBuf {
        self.root.join("test-summary")
    }

    pub fn test_summary_file(&self) -> PathBuf {
        self.test_summary_dir().join("test-summary.txt")
    }

    pub fn test_results_dir(&self) -> PathBuf {
        self.root.join("test-results")
    }

    pub fn lint_summary_dir(&self) -> PathBuf {
        self.root.join("custom-lint-summary")
    }

    pub fn lint_summary_file(&self) -> PathBuf {
        self.lint_summary_dir().join("lint-summary.txt")
    }

    pub fn package_dir(&self) -> PathBuf {
        self.root.join("java-package")
    }

    pub fn coverage_csv(&self) -> PathBuf {
        self.root.join("coverage-report").join("jacoco.csv")
    }

    /// Root directory as a path reference.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACTS_DIR)
    }
}

/// Whether a root entry name marks a security scan (case-sensitive).
pub fn is_security_scan_name(name: &str) -> bool {
    SECURITY_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Whether a file name has a recognised build artifact extension.
pub fn is_build_artifact_name(name: &str) -> bool {
    BUILD_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
