//! Discovery of benchmark cases on disk.
//!
//! The benchmark corpus is laid out as
//! `<root>/<benchmark>/<program>/<Eq|Neq>/` where each verdict-labeled leaf
//! holds an old/new C source pair and, optionally, a descriptor naming the
//! single function under test.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::descriptor::{load_descriptor, CaseDescriptor};
use crate::model::{CaseType, ExpectedLabel, ResultRow, Verdict};

/// Accepted filename conventions for the source pair. The plain names win
/// when both conventions are present.
const OLD_NAMES: [&str; 2] = ["old.c", "oldV.c"];
const NEW_NAMES: [&str; 2] = ["new.c", "newV.c"];

/// One old/new program pair under test.
#[derive(Debug, Clone)]
pub struct BenchmarkCase {
    /// Benchmark name: second-to-last path segment before the label.
    pub benchmark: String,
    /// Program name: last path segment before the label.
    pub program: String,
    pub expected: ExpectedLabel,
    /// The verdict-labeled case directory.
    pub dir: PathBuf,
    pub old_source: PathBuf,
    pub new_source: PathBuf,
    pub descriptor: Option<CaseDescriptor>,
}

impl BenchmarkCase {
    pub fn case_type(&self) -> CaseType {
        if self.descriptor.is_some() {
            CaseType::FunctionLevel
        } else {
            CaseType::Aggregated
        }
    }

    /// Function filter to pass to the compare step, for function-level cases.
    pub fn function_filter(&self) -> Option<&str> {
        self.descriptor.as_ref().map(|descriptor| descriptor.function.as_str())
    }

    /// Assemble the final result row for this case from a classified verdict.
    pub fn result_row(&self, verdict: &Verdict) -> ResultRow {
        ResultRow::new(
            self.case_type(),
            self.benchmark.clone(),
            self.program.clone(),
            self.expected,
            verdict,
        )
    }
}

fn find_source(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

/// Discover every case under `root` carrying the given label.
///
/// Program directories without a complete source pair under either naming
/// convention are skipped. The result is sorted by (benchmark, program) so
/// the downstream output order is reproducible and diffable.
pub fn discover_cases(root: &Path, label: ExpectedLabel) -> Result<Vec<BenchmarkCase>> {
    if !root.is_dir() {
        bail!("Benchmark source directory {} does not exist", root.display());
    }

    let mut cases = Vec::new();
    for bench_entry in
        fs::read_dir(root).with_context(|| format!("Failed to read {}", root.display()))?
    {
        let bench_entry = bench_entry?;
        if !bench_entry.file_type()?.is_dir() {
            continue;
        }
        let benchmark = bench_entry.file_name().to_string_lossy().to_string();
        let bench_path = bench_entry.path();
        for prog_entry in fs::read_dir(&bench_path)
            .with_context(|| format!("Failed to read {}", bench_path.display()))?
        {
            let prog_entry = prog_entry?;
            if !prog_entry.file_type()?.is_dir() {
                continue;
            }
            let program = prog_entry.file_name().to_string_lossy().to_string();
            let case_dir = prog_entry.path().join(label.as_str());
            if !case_dir.is_dir() {
                continue;
            }
            let (Some(old_source), Some(new_source)) =
                (find_source(&case_dir, &OLD_NAMES), find_source(&case_dir, &NEW_NAMES))
            else {
                continue;
            };
            let descriptor = load_descriptor(&case_dir).with_context(|| {
                format!("Failed to load case descriptor in {}", case_dir.display())
            })?;

            cases.push(BenchmarkCase {
                benchmark: benchmark.clone(),
                program,
                expected: label,
                dir: case_dir,
                old_source,
                new_source,
                descriptor,
            });
        }
    }

    cases.sort_by(|a, b| a.benchmark.cmp(&b.benchmark).then(a.program.cmp(&b.program)));
    Ok(cases)
}
