//! Output directory layout.

use std::path::{Path, PathBuf};

use logsift_core::errors::StorageError;

use crate::io_error;

pub const RECOVERED_PAIRS: &str = "recovered_pairs.csv";
pub const UNRESOLVED_PAIRS: &str = "unresolved_pairs.csv";
pub const FILTERED_RECOVERED_PAIRS: &str = "filtered_recovered_pairs.csv";
pub const MONTHLY_RECOVERY: &str = "monthly_recovery.csv";
pub const SUMMARY: &str = "summary.json";
pub const RECOVERY_REPORT: &str = "recovery_report.json";

/// Record sets land at `<dir>/<set name>.csv`; the fixed names above
/// cover everything else.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl OutputLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if needed.
    pub fn ensure(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))
    }

    pub fn record_set(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sanitize(name)))
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Set names are hyphenated labels; anything else becomes `_`.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
