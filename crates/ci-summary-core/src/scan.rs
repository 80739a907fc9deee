//! Probing the artifacts root for evidence of each pipeline stage.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

use crate::error::{Result, SummaryError, SummaryWarning};
use crate::layout::{is_build_artifact_name, is_security_scan_name, ArtifactLayout};

/// Which pipeline stages left artifacts behind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ArtifactSet {
    pub has_tests: bool,
    pub has_lint: bool,
    pub has_build: bool,

    /// Names of root entries that look like security scan uploads, sorted.
    pub security_scans: Vec<String>,
}

impl ArtifactSet {
    /// Probe `layout.root`, which must exist.
    pub fn probe(layout: &ArtifactLayout) -> Result<Self> {
        let has_tests = layout.test_summary_dir().exists() || layout.test_results_dir().exists();
        let has_lint = layout.lint_summary_dir().exists();
        let has_build = layout.package_dir().exists();
        let security_scans = list_security_scans(layout.root())?;

        Ok(Self {
            has_tests,
            has_lint,
            has_build,
            security_scans,
        })
    }

    pub fn has_security(&self) -> bool {
        !self.security_scans.is_empty()
    }
}

/// Immediate children of `root` (files or directories) whose names carry a
/// security marker.
fn list_security_scans(root: &Path) -> Result<Vec<String>> {
    let mut scans = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| SummaryError::list(root, e))? {
        let entry = entry.map_err(|e| SummaryError::list(root, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_security_scan_name(&name) {
            scans.push(name);
        }
    }
    scans.sort();
    Ok(scans)
}

/// A packaged Java archive found under the package directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildArtifact {
    /// Path relative to the package directory, `/`-separated.
    pub relative_path: String,

    /// `None` when the file size could not be read.
    pub size_bytes: Option<u64>,
}

impl BuildArtifact {
    /// Size in MiB with one decimal, e.g. `1.5`.
    pub fn size_mib(&self) -> Option<String> {
        self.size_bytes
            .map(|bytes| format!("{:.1}", bytes as f64 / (1024.0 * 1024.0)))
    }

    /// Markdown list item, e.g. ``- `app.jar` (1.5 MB)``.
    pub fn to_markdown_item(&self) -> String {
        match self.size_mib() {
            Some(size) => format!("- `{}` ({} MB)", self.relative_path, size),
            None => format!("- `{}`", self.relative_path),
        }
    }
}

/// Build artifacts plus warnings for entries that could not be inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArtifactScan {
    pub artifacts: Vec<BuildArtifact>,
    pub warnings: Vec<SummaryWarning>,
}

/// Recursively collect `.jar`/`.war`/`.ear` files under `package_dir`,
/// sorted by relative path.
pub fn collect_build_artifacts(package_dir: &Path) -> BuildArtifactScan {
    let mut scan = BuildArtifactScan::default();

    for entry in WalkDir::new(package_dir).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| package_dir.to_path_buf());
                scan.warnings.push(SummaryWarning::ArtifactWalkFailed {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !is_build_artifact_name(&name) {
            continue;
        }

        let relative_path = relative_display(package_dir, entry.path());
        let size_bytes = match fs::metadata(entry.path()) {
            Ok(meta) => Some(meta.len()),
            Err(e) => {
                scan.warnings.push(SummaryWarning::ArtifactSizeUnavailable {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                });
                None
            }
        };

        scan.artifacts.push(BuildArtifact {
            relative_path,
            size_bytes,
        });
    }

    scan.artifacts.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    scan
}

fn relative_display(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
