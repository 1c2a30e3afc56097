//! Adapter around the external equivalence checker.
//!
//! The checker is driven as a black-box subprocess with two operations:
//! `build` compiles one C source file into a snapshot directory, and
//! `compare` checks two snapshots against each other, printing a statistics
//! report on stdout and writing a structured result document into its
//! output directory.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use thiserror::Error;

/// Default command name of the external checker.
pub const DEFAULT_TOOL: &str = "diffkemp";

/// Error from one external build/compare invocation.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn { command: String, source: std::io::Error },

    /// The process ran but exited with a failure status. `output` carries
    /// the captured stdout and stderr for diagnosis.
    #[error("'{command}' exited with {status}\n{output}")]
    Failed { command: String, status: ExitStatus, output: String },
}

/// Invokes the external checker's build and compare operations.
#[derive(Debug, Clone)]
pub struct ToolAdapter {
    tool: PathBuf,
}

impl ToolAdapter {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }

    /// Path or command name of the wrapped checker.
    pub fn tool(&self) -> &Path {
        &self.tool
    }

    /// Checker version string: the first non-empty line of `--version`.
    pub fn version(&self) -> Result<String, ProcessError> {
        let mut cmd = Command::new(&self.tool);
        cmd.arg("--version");
        let output = run(&mut cmd)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let first = stdout.lines().find(|line| !line.trim().is_empty()).unwrap_or("").trim();
        if first.is_empty() {
            return Err(ProcessError::Failed {
                command: render_command(&cmd),
                status: output.status,
                output: "--version produced no output".to_string(),
            });
        }
        Ok(first.to_string())
    }

    /// Build a snapshot of `source` into `output_dir`.
    ///
    /// The checker's informational stdout is captured and discarded; a
    /// non-zero exit propagates the captured output instead of letting a
    /// broken build pass silently.
    pub fn build(&self, source: &Path, output_dir: &Path) -> Result<(), ProcessError> {
        let mut cmd = Command::new(&self.tool);
        cmd.arg("build").arg(source).arg(output_dir);
        run(&mut cmd)?;
        Ok(())
    }

    /// Compare two snapshots, optionally restricted to a single function.
    ///
    /// Requests the statistics report and returns the checker's captured
    /// stdout for the report parser.
    pub fn compare(
        &self,
        old_dir: &Path,
        new_dir: &Path,
        output_dir: &Path,
        function: Option<&str>,
    ) -> Result<String, ProcessError> {
        let mut cmd = Command::new(&self.tool);
        cmd.arg("compare")
            .arg(old_dir)
            .arg(new_dir)
            .arg("-o")
            .arg(output_dir)
            .arg("--report-stat");
        if let Some(name) = function {
            cmd.arg("--function").arg(name);
        }
        let output = run(&mut cmd)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn run(cmd: &mut Command) -> Result<Output, ProcessError> {
    let command = render_command(cmd);
    let output =
        cmd.output().map_err(|source| ProcessError::Spawn { command: command.clone(), source })?;
    if !output.status.success() {
        let mut text = String::from_utf8_lossy(&output.stdout).to_string();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(ProcessError::Failed { command, status: output.status, output: text });
    }
    Ok(output)
}

/// Render a command line for diagnostics: program followed by its args.
fn render_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
