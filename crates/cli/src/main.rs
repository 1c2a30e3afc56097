use anyhow::Result;
use clap::{Parser, Subcommand};

use eqbench::commands::{list_cases_command, run_benchmark_command};

/// Equivalence-checker benchmark runner CLI.
///
/// This CLI is a thin wrapper around `eqbench-core` (exposed in code as
/// `eqbench_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "eqbench",
    version,
    about = "Benchmark runner for semantic equivalence checkers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build, compare, and classify every benchmark case.
    ///
    /// Writes one result row per case to `results.csv` in the output
    /// directory, plus a `run_metadata.json` bookkeeping record.
    Run {
        /// Directory holding the benchmark sources.
        #[arg(long, default_value = "eqbench")]
        source: String,

        /// Directory for snapshots, compare outputs, and the results file.
        #[arg(long, default_value = "eqbench-results")]
        output: String,

        /// Command name or path of the external equivalence checker.
        #[arg(long, default_value = eqbench_core::tools::DEFAULT_TOOL)]
        tool: String,

        /// Skip the build phase and compare already-built snapshots.
        #[arg(long, default_value_t = false)]
        skip_build: bool,

        /// Record tool failures as skipped cases instead of aborting the run.
        #[arg(long, default_value_t = false)]
        keep_going: bool,
    },

    /// List the benchmark cases a run would evaluate.
    ListCases {
        /// Directory holding the benchmark sources.
        #[arg(long, default_value = "eqbench")]
        source: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { source, output, tool, skip_build, keep_going } => {
            run_benchmark_command(&source, &output, &tool, skip_build, keep_going)?
        }
        Command::ListCases { source, json } => list_cases_command(&source, json)?,
    }

    Ok(())
}
