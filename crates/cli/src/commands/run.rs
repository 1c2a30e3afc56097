use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use eqbench_core::cases::{discover_cases, BenchmarkCase};
use eqbench_core::classify::classify;
use eqbench_core::layout::RunLayout;
use eqbench_core::model::{ExpectedLabel, ResultRow};
use eqbench_core::report::{parse_stat_report, DiskFunctionSource};
use eqbench_core::tools::ToolAdapter;

/// Bookkeeping record written next to the results file after a run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunMetadata {
    pub tool: String,
    pub tool_version: Option<String>,
    pub started_at: String,
    pub finished_at: String,
    pub cases: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
}

/// Run the full benchmark: build snapshots for every case, then compare and
/// classify one case at a time, appending result rows incrementally.
///
/// Everything is strictly sequential; every build finishes before the first
/// compare starts. A tool failure aborts the run unless `keep_going` is set,
/// in which case the failing case is skipped (no row) and counted in the run
/// metadata. Rows already written stay on disk either way.
pub fn run_benchmark_command(
    source: &str,
    output: &str,
    tool: &str,
    skip_build: bool,
    keep_going: bool,
) -> Result<()> {
    let source_root = Path::new(source);
    let layout = RunLayout::new(output);
    let adapter = ToolAdapter::new(tool);
    let started_at = Utc::now().to_rfc3339();

    // Eq cases first, then Neq, each pre-sorted by discovery: the results
    // file is meant to be diffed across runs.
    let mut cases = discover_cases(source_root, ExpectedLabel::Eq)?;
    cases.extend(discover_cases(source_root, ExpectedLabel::Neq)?);
    if cases.is_empty() {
        bail!("No benchmark cases found under {}", source_root.display());
    }
    println!("Discovered {} cases under {}", cases.len(), source_root.display());

    let mut skipped: HashSet<PathBuf> = HashSet::new();
    if skip_build {
        println!("Skipping build phase (using existing snapshots)");
    } else {
        for case in &cases {
            if let Err(err) = build_case(&adapter, &layout, case) {
                if !keep_going {
                    return Err(err);
                }
                eprintln!("Skipping {}: {err:#}", describe(case));
                skipped.insert(case.dir.clone());
            }
        }
    }

    fs::create_dir_all(&layout.root)
        .with_context(|| format!("Failed to create output dir {}", layout.root.display()))?;
    let mut results = fs::File::create(&layout.results_path).with_context(|| {
        format!("Failed to create results file {}", layout.results_path.display())
    })?;
    writeln!(results, "{}", ResultRow::HEADER)
        .with_context(|| format!("Failed to write {}", layout.results_path.display()))?;

    let mut correct = 0usize;
    let mut incorrect = 0usize;
    for case in &cases {
        if skipped.contains(&case.dir) {
            continue;
        }
        let row = match evaluate_case(&adapter, &layout, case) {
            Ok(row) => row,
            Err(err) => {
                if !keep_going {
                    return Err(err);
                }
                eprintln!("Skipping {}: {err:#}", describe(case));
                skipped.insert(case.dir.clone());
                continue;
            }
        };
        if row.correct {
            correct += 1;
        } else {
            incorrect += 1;
        }
        println!(
            "  {} -> {} ({})",
            describe(case),
            row.actual,
            if row.correct { "correct" } else { "incorrect" }
        );
        // Rows are written unbuffered, one at a time; whatever is on disk
        // when a later case aborts the run stays there.
        writeln!(results, "{}", row.to_line())
            .with_context(|| format!("Failed to write {}", layout.results_path.display()))?;
    }

    let metadata = RunMetadata {
        tool: tool.to_string(),
        tool_version: adapter.version().ok(),
        started_at,
        finished_at: Utc::now().to_rfc3339(),
        cases: cases.len(),
        correct,
        incorrect,
        skipped: skipped.len(),
    };
    fs::write(&layout.metadata_path, serde_json::to_string_pretty(&metadata)?).with_context(
        || format!("Failed to write run metadata at {}", layout.metadata_path.display()),
    )?;

    println!("Wrote {} rows to {}", correct + incorrect, layout.results_path.display());
    println!("  Correct:   {correct}");
    println!("  Incorrect: {incorrect}");
    if !skipped.is_empty() {
        println!("  Skipped:   {}", skipped.len());
    }

    Ok(())
}

/// Build the old and new snapshots of one case.
fn build_case(adapter: &ToolAdapter, layout: &RunLayout, case: &BenchmarkCase) -> Result<()> {
    let old_dir = layout.old_snapshot_dir(case);
    let new_dir = layout.new_snapshot_dir(case);
    fs::create_dir_all(&old_dir)
        .with_context(|| format!("Failed to create snapshot dir {}", old_dir.display()))?;
    fs::create_dir_all(&new_dir)
        .with_context(|| format!("Failed to create snapshot dir {}", new_dir.display()))?;
    adapter
        .build(&case.old_source, &old_dir)
        .with_context(|| format!("Build failed for {}", case.old_source.display()))?;
    adapter
        .build(&case.new_source, &new_dir)
        .with_context(|| format!("Build failed for {}", case.new_source.display()))?;
    Ok(())
}

/// Compare, parse, and classify one case into its result row.
fn evaluate_case(
    adapter: &ToolAdapter,
    layout: &RunLayout,
    case: &BenchmarkCase,
) -> Result<ResultRow> {
    let old_dir = layout.old_snapshot_dir(case);
    let new_dir = layout.new_snapshot_dir(case);
    let compare_dir = layout.compare_dir(case);
    fs::create_dir_all(&compare_dir)
        .with_context(|| format!("Failed to create compare dir {}", compare_dir.display()))?;

    let report_text = adapter
        .compare(&old_dir, &new_dir, &compare_dir, case.function_filter())
        .with_context(|| format!("Compare failed for {}", describe(case)))?;
    let report = parse_stat_report(&report_text)
        .with_context(|| format!("Malformed compare report for {}", describe(case)))?;

    // Function lists are loaded lazily; Eq/Neq cases never read them.
    let source = DiskFunctionSource::new(&compare_dir, &old_dir);
    let verdict = classify(&report, &source)
        .with_context(|| format!("Classification failed for {}", describe(case)))?;

    Ok(case.result_row(&verdict))
}

fn describe(case: &BenchmarkCase) -> String {
    format!("{}/{} [{}]", case.benchmark, case.program, case.expected)
}
