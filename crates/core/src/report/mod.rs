//! Parsing of the compare step's outputs.
//!
//! The external checker produces two kinds of output per case: a textual
//! statistics report on stdout (aggregate symbol counts) and structured YAML
//! documents on disk (the per-case compare results and the snapshot's
//! function list). This module owns the schema knowledge for all three.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::classify::FunctionSource;

/// File name of the structured compare result document, written by the
/// checker into the compare output directory.
pub const RESULT_DOC_NAME: &str = "diffkemp-out.yaml";

/// File name of the snapshot document, written by the build step into each
/// snapshot directory.
pub const SNAPSHOT_DOC_NAME: &str = "snapshot.yaml";

#[derive(Debug, Error)]
pub enum ReportError {
    /// A count line was absent from the textual report. The checker's output
    /// format is assumed stable; a missing line means the checker failed and
    /// must not be read as zero.
    #[error("comparison report is missing a '{0}' line")]
    MissingCount(&'static str),

    /// A count line matched but its number did not fit the count type.
    #[error("comparison report has an unparsable '{0}' count")]
    InvalidCount(&'static str),

    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("malformed compare result document: {0}")]
    MalformedResultDoc(serde_yaml::Error),

    #[error("malformed snapshot document: {0}")]
    MalformedSnapshotDoc(serde_yaml::Error),
}

/// Aggregate counts extracted from one textual compare report.
///
/// The three counts come from the same report but are not cross-validated:
/// `equal_symbols + not_equal_symbols` need not sum to `total_symbols`, and
/// the classifier tolerates the inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonReport {
    pub total_symbols: u64,
    pub equal_symbols: u64,
    pub not_equal_symbols: u64,
}

/// Extract the three symbol counts from the checker's textual report.
///
/// Each count is matched independently as a labeled integer at the start of
/// a line, case-sensitively, anywhere in the multi-line report.
pub fn parse_stat_report(text: &str) -> Result<ComparisonReport, ReportError> {
    Ok(ComparisonReport {
        total_symbols: labeled_count(text, "Total symbols:")?,
        equal_symbols: labeled_count(text, "Equal:")?,
        not_equal_symbols: labeled_count(text, "Not equal:")?,
    })
}

fn labeled_count(text: &str, label: &'static str) -> Result<u64, ReportError> {
    let pattern =
        Regex::new(&format!(r"(?m)^{label}\s*(\d+)")).expect("count pattern is a valid regex");
    let captures = pattern.captures(text).ok_or(ReportError::MissingCount(label))?;
    captures[1].parse().map_err(|_| ReportError::InvalidCount(label))
}

#[derive(Debug, Deserialize)]
struct CompareResultDoc {
    #[serde(default)]
    results: Vec<CompareResultEntry>,
}

#[derive(Debug, Deserialize)]
struct CompareResultEntry {
    function: String,
}

/// Extract the ordered list of functions the checker judged not equal from
/// the compare result document (`results[].function`).
///
/// Empty when every compared symbol was equal.
pub fn not_equal_functions(body: &str) -> Result<Vec<String>, ReportError> {
    let doc: CompareResultDoc =
        serde_yaml::from_str(body).map_err(ReportError::MalformedResultDoc)?;
    Ok(doc.results.into_iter().map(|entry| entry.function).collect())
}

#[derive(Debug, Deserialize)]
struct SnapshotGroup {
    #[serde(default)]
    list: Vec<SnapshotFunction>,
}

#[derive(Debug, Deserialize)]
struct SnapshotFunction {
    name: String,
}

/// Extract the ordered list of all function names recorded in the first
/// symbol group of a snapshot document (`[0].list[].name`).
pub fn snapshot_functions(body: &str) -> Result<Vec<String>, ReportError> {
    let groups: Vec<SnapshotGroup> =
        serde_yaml::from_str(body).map_err(ReportError::MalformedSnapshotDoc)?;
    Ok(groups
        .into_iter()
        .next()
        .map(|group| group.list.into_iter().map(|function| function.name).collect())
        .unwrap_or_default())
}

/// On-disk source for the function lists behind one compare run.
///
/// The documents are read only when a list is actually requested, so the
/// common Eq/Neq classification paths never touch the filesystem.
#[derive(Debug, Clone)]
pub struct DiskFunctionSource {
    result_doc: PathBuf,
    snapshot_doc: PathBuf,
}

impl DiskFunctionSource {
    /// `compare_dir` is the compare output directory holding the result
    /// document; `old_snapshot_dir` is the baseline snapshot directory
    /// holding the function universe.
    pub fn new(compare_dir: &Path, old_snapshot_dir: &Path) -> Self {
        Self {
            result_doc: compare_dir.join(RESULT_DOC_NAME),
            snapshot_doc: old_snapshot_dir.join(SNAPSHOT_DOC_NAME),
        }
    }

    fn read(path: &Path) -> Result<String, ReportError> {
        fs::read_to_string(path)
            .map_err(|source| ReportError::Io { path: path.to_path_buf(), source })
    }
}

impl FunctionSource for DiskFunctionSource {
    fn not_equal_functions(&self) -> Result<Vec<String>, ReportError> {
        not_equal_functions(&Self::read(&self.result_doc)?)
    }

    fn all_functions(&self) -> Result<Vec<String>, ReportError> {
        snapshot_functions(&Self::read(&self.snapshot_doc)?)
    }
}
