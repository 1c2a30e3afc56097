//! Optional per-case descriptor naming the single function under test.
//!
//! Presence of the descriptor marks a case function-level (the compare step
//! is restricted to the named function); absence marks it aggregated (the
//! whole program is compared).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File name of the descriptor inside a case directory.
pub const DESCRIPTOR_FILE: &str = "case.yaml";

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to parse descriptor {path}: {source}")]
    Yaml { path: PathBuf, source: serde_yaml::Error },

    /// The descriptor exists but does not name a function. The compare step
    /// scopes its function filter on this field, so there is nothing useful
    /// to fall back to.
    #[error("descriptor {0} is missing the 'function' field")]
    MissingFunction(PathBuf),
}

/// Per-case metadata: the one function expected to differ between the old
/// and new program versions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaseDescriptor {
    pub function: String,
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    function: Option<String>,
}

/// Load the descriptor from `dir`, if present.
///
/// A missing file is `Ok(None)` (the case is aggregated); a present file
/// without a function name is an error.
pub fn load_descriptor(dir: &Path) -> Result<Option<CaseDescriptor>, DescriptorError> {
    let path = dir.join(DESCRIPTOR_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let body = fs::read_to_string(&path)
        .map_err(|source| DescriptorError::Io { path: path.clone(), source })?;
    let raw: RawDescriptor = serde_yaml::from_str(&body)
        .map_err(|source| DescriptorError::Yaml { path: path.clone(), source })?;
    match raw.function {
        Some(function) => Ok(Some(CaseDescriptor { function })),
        None => Err(DescriptorError::MissingFunction(path)),
    }
}
