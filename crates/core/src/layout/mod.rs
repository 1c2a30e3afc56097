//! Logical layout of one benchmark run's output directory.

use std::path::{Path, PathBuf};

use crate::cases::BenchmarkCase;

/// File name of the delimited results file.
pub const RESULTS_FILE: &str = "results.csv";

/// File name of the run bookkeeping record.
pub const METADATA_FILE: &str = "run_metadata.json";

/// Computed output paths for a run.
///
/// Derived from the chosen output root; does not perform any IO itself.
/// Callers create the directories they need.
#[derive(Debug, Clone)]
pub struct RunLayout {
    /// Root of the output directory.
    pub root: PathBuf,
    /// Path of the results file.
    pub results_path: PathBuf,
    /// Path of the run metadata record.
    pub metadata_path: PathBuf,
}

impl RunLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let results_path = root.join(RESULTS_FILE);
        let metadata_path = root.join(METADATA_FILE);
        Self { root, results_path, metadata_path }
    }

    /// Directory holding every artifact of one case, mirroring the case's
    /// benchmark/program/label position in the source tree.
    pub fn case_dir(&self, case: &BenchmarkCase) -> PathBuf {
        self.root.join(&case.benchmark).join(&case.program).join(case.expected.as_str())
    }

    /// Snapshot directory of the baseline (old) program version.
    pub fn old_snapshot_dir(&self, case: &BenchmarkCase) -> PathBuf {
        self.case_dir(case).join("old")
    }

    /// Snapshot directory of the changed (new) program version.
    pub fn new_snapshot_dir(&self, case: &BenchmarkCase) -> PathBuf {
        self.case_dir(case).join("new")
    }

    /// Compare output directory; the checker writes its result document here.
    pub fn compare_dir(&self, case: &BenchmarkCase) -> PathBuf {
        self.case_dir(case).join("cmp")
    }
}
