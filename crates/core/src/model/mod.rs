//! Core data model for benchmark cases and their evaluation results.

use std::fmt;

/// Ground-truth label for a case, taken from the verdict-labeled directory
/// ("Eq" or "Neq") the case was discovered under.
///
/// Fixed at discovery time and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedLabel {
    Eq,
    Neq,
}

impl ExpectedLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedLabel::Eq => "Eq",
            ExpectedLabel::Neq => "Neq",
        }
    }

    /// Parse a directory name into a label. Names are matched exactly;
    /// anything else is not a verdict-labeled directory.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "Eq" => Some(ExpectedLabel::Eq),
            "Neq" => Some(ExpectedLabel::Neq),
            _ => None,
        }
    }
}

impl fmt::Display for ExpectedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a case exercises a single changed function or a whole program.
///
/// Derived from descriptor presence: cases carrying a descriptor compare one
/// named function, cases without one are compared in aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseType {
    FunctionLevel,
    Aggregated,
}

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::FunctionLevel => "function-level",
            CaseType::Aggregated => "aggregated",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one case.
///
/// `Mixed` carries the per-function breakdown: the counts come from the
/// textual report, the function lists from the structured documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Eq,
    Neq,
    Mixed {
        equal: u64,
        equal_functions: Vec<String>,
        not_equal: u64,
        not_equal_functions: Vec<String>,
    },
}

impl Verdict {
    /// True when the rendered verdict matches the expected label exactly.
    ///
    /// A mixed verdict never renders as a plain label, so it always counts
    /// as incorrect.
    pub fn is_correct(&self, expected: ExpectedLabel) -> bool {
        self.to_string() == expected.as_str()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Eq => f.write_str("Eq"),
            Verdict::Neq => f.write_str("Neq"),
            Verdict::Mixed { equal, equal_functions, not_equal, not_equal_functions } => {
                write!(
                    f,
                    "{} Eq {}, {} Neq {}",
                    equal,
                    render_function_list(equal_functions),
                    not_equal,
                    render_function_list(not_equal_functions)
                )
            }
        }
    }
}

/// Render a function list the way it appears inside a mixed verdict:
/// bracketed, single-quoted names separated by comma-space.
fn render_function_list(functions: &[String]) -> String {
    let quoted: Vec<String> = functions.iter().map(|name| format!("'{name}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// One line of the results file, created exactly once per case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub case_type: CaseType,
    pub benchmark: String,
    pub program: String,
    pub expected: ExpectedLabel,
    /// Verdict rendered as text.
    pub actual: String,
    pub correct: bool,
}

impl ResultRow {
    /// Header line of the results file.
    pub const HEADER: &'static str = "type;benchmark;program;expected;result;correct";

    pub fn new(
        case_type: CaseType,
        benchmark: impl Into<String>,
        program: impl Into<String>,
        expected: ExpectedLabel,
        verdict: &Verdict,
    ) -> Self {
        Self {
            case_type,
            benchmark: benchmark.into(),
            program: program.into(),
            expected,
            actual: verdict.to_string(),
            correct: verdict.is_correct(expected),
        }
    }

    /// Render as one semicolon-joined data line.
    ///
    /// Field contents are not escaped; benchmark and program names are
    /// controlled and expected to be delimiter-free.
    pub fn to_line(&self) -> String {
        format!(
            "{};{};{};{};{};{}",
            self.case_type, self.benchmark, self.program, self.expected, self.actual, self.correct
        )
    }
}
