//! Verdict classification.
//!
//! Given the aggregate counts of one compare run, decide whether the case
//! verdict is Eq, Neq, or a mixed breakdown, and reconcile the rendered
//! verdict with the expected label. Classification is deterministic and
//! performs no IO of its own.

use crate::model::Verdict;
use crate::report::{ComparisonReport, ReportError};

/// Capability to fetch the function lists behind a compare run on demand.
///
/// The classifier consults this only when it reaches the mixed branch, so
/// cases that classify as plain Eq or Neq never load the underlying
/// documents.
pub trait FunctionSource {
    /// Functions the checker flagged as not equivalent, in result order.
    fn not_equal_functions(&self) -> Result<Vec<String>, ReportError>;

    /// All functions present in the baseline snapshot, in snapshot order.
    fn all_functions(&self) -> Result<Vec<String>, ReportError>;
}

/// Decide the verdict for one case.
///
/// Step order matters: an all-zero report satisfies the first comparison
/// and classifies as Eq.
pub fn classify(
    report: &ComparisonReport,
    source: &dyn FunctionSource,
) -> Result<Verdict, ReportError> {
    if report.equal_symbols == report.total_symbols {
        return Ok(Verdict::Eq);
    }
    if report.not_equal_symbols == report.total_symbols {
        return Ok(Verdict::Neq);
    }

    // Some symbols equal, some not (or the counts disagree with the total):
    // break the case down per function. The equal side is the snapshot
    // universe minus every flagged name, in universe order.
    let not_equal_functions = source.not_equal_functions()?;
    let equal_functions: Vec<String> = source
        .all_functions()?
        .into_iter()
        .filter(|name| !not_equal_functions.contains(name))
        .collect();

    Ok(Verdict::Mixed {
        equal: report.equal_symbols,
        equal_functions,
        not_equal: report.not_equal_symbols,
        not_equal_functions,
    })
}
