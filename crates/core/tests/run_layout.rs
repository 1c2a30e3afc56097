use std::path::Path;

use eqbench_core::cases::BenchmarkCase;
use eqbench_core::layout::RunLayout;
use eqbench_core::model::ExpectedLabel;

fn sample_case(label: ExpectedLabel) -> BenchmarkCase {
    let dir = Path::new("bench-src/loops/sum").join(label.as_str());
    BenchmarkCase {
        benchmark: "loops".to_string(),
        program: "sum".to_string(),
        expected: label,
        old_source: dir.join("old.c"),
        new_source: dir.join("new.c"),
        dir,
        descriptor: None,
    }
}

#[test]
fn layout_mirrors_the_case_position_under_the_output_root() {
    let layout = RunLayout::new("out");
    let case = sample_case(ExpectedLabel::Eq);

    assert_eq!(layout.case_dir(&case), Path::new("out/loops/sum/Eq"));
    assert_eq!(layout.old_snapshot_dir(&case), Path::new("out/loops/sum/Eq/old"));
    assert_eq!(layout.new_snapshot_dir(&case), Path::new("out/loops/sum/Eq/new"));
    assert_eq!(layout.compare_dir(&case), Path::new("out/loops/sum/Eq/cmp"));
}

#[test]
fn eq_and_neq_cases_get_separate_artifact_dirs() {
    let layout = RunLayout::new("out");
    let eq_dir = layout.case_dir(&sample_case(ExpectedLabel::Eq));
    let neq_dir = layout.case_dir(&sample_case(ExpectedLabel::Neq));
    assert_ne!(eq_dir, neq_dir);
}

#[test]
fn top_level_files_live_directly_under_the_root() {
    let layout = RunLayout::new("out");
    assert_eq!(layout.results_path, Path::new("out/results.csv"));
    assert_eq!(layout.metadata_path, Path::new("out/run_metadata.json"));
}
