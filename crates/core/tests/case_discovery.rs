use std::fs;
use std::path::Path;

use eqbench_core::cases::discover_cases;
use eqbench_core::model::{CaseType, ExpectedLabel};
use tempfile::tempdir;

fn make_case(root: &Path, benchmark: &str, program: &str, label: &str, old: &str, new: &str) {
    let dir = root.join(benchmark).join(program).join(label);
    fs::create_dir_all(&dir).expect("create case dir");
    fs::write(dir.join(old), "int main(void) { return 0; }\n").expect("write old source");
    fs::write(dir.join(new), "int main(void) { return 0; }\n").expect("write new source");
}

#[test]
fn discovers_cases_with_plain_filenames() {
    let temp = tempdir().expect("tempdir");
    make_case(temp.path(), "loops", "sum", "Eq", "old.c", "new.c");

    let cases = discover_cases(temp.path(), ExpectedLabel::Eq).expect("discover");
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].benchmark, "loops");
    assert_eq!(cases[0].program, "sum");
    assert_eq!(cases[0].expected, ExpectedLabel::Eq);
    assert!(cases[0].old_source.ends_with("old.c"));
    assert!(cases[0].new_source.ends_with("new.c"));
}

#[test]
fn discovers_cases_with_versioned_filenames() {
    let temp = tempdir().expect("tempdir");
    make_case(temp.path(), "loops", "sum", "Neq", "oldV.c", "newV.c");

    let cases = discover_cases(temp.path(), ExpectedLabel::Neq).expect("discover");
    assert_eq!(cases.len(), 1);
    assert!(cases[0].old_source.ends_with("oldV.c"));
    assert!(cases[0].new_source.ends_with("newV.c"));
}

#[test]
fn filename_conventions_may_mix_within_a_case() {
    let temp = tempdir().expect("tempdir");
    make_case(temp.path(), "loops", "sum", "Eq", "old.c", "newV.c");

    let cases = discover_cases(temp.path(), ExpectedLabel::Eq).expect("discover");
    assert_eq!(cases.len(), 1);
    assert!(cases[0].old_source.ends_with("old.c"));
    assert!(cases[0].new_source.ends_with("newV.c"));
}

#[test]
fn skips_directories_without_a_complete_source_pair() {
    let temp = tempdir().expect("tempdir");
    let dir = temp.path().join("loops").join("sum").join("Eq");
    fs::create_dir_all(&dir).expect("create case dir");
    fs::write(dir.join("old.c"), "int x;\n").expect("write old source");

    let cases = discover_cases(temp.path(), ExpectedLabel::Eq).expect("discover");
    assert!(cases.is_empty());
}

#[test]
fn only_matching_label_directories_are_picked_up() {
    let temp = tempdir().expect("tempdir");
    make_case(temp.path(), "loops", "sum", "Eq", "old.c", "new.c");
    make_case(temp.path(), "loops", "shift", "Neq", "old.c", "new.c");

    let eq_cases = discover_cases(temp.path(), ExpectedLabel::Eq).expect("discover");
    assert_eq!(eq_cases.len(), 1);
    assert_eq!(eq_cases[0].program, "sum");

    let neq_cases = discover_cases(temp.path(), ExpectedLabel::Neq).expect("discover");
    assert_eq!(neq_cases.len(), 1);
    assert_eq!(neq_cases[0].program, "shift");
}

#[test]
fn cases_are_sorted_by_benchmark_then_program() {
    let temp = tempdir().expect("tempdir");
    make_case(temp.path(), "zlib", "inflate", "Eq", "old.c", "new.c");
    make_case(temp.path(), "loops", "sum", "Eq", "old.c", "new.c");
    make_case(temp.path(), "loops", "shift", "Eq", "old.c", "new.c");

    let cases = discover_cases(temp.path(), ExpectedLabel::Eq).expect("discover");
    let names: Vec<(String, String)> =
        cases.iter().map(|case| (case.benchmark.clone(), case.program.clone())).collect();
    assert_eq!(
        names,
        vec![
            ("loops".to_string(), "shift".to_string()),
            ("loops".to_string(), "sum".to_string()),
            ("zlib".to_string(), "inflate".to_string()),
        ]
    );
}

#[test]
fn descriptor_presence_makes_a_case_function_level() {
    let temp = tempdir().expect("tempdir");
    make_case(temp.path(), "loops", "sum", "Neq", "old.c", "new.c");
    let case_dir = temp.path().join("loops").join("sum").join("Neq");
    fs::write(case_dir.join("case.yaml"), "function: sum_loop\n").expect("write descriptor");

    let cases = discover_cases(temp.path(), ExpectedLabel::Neq).expect("discover");
    assert_eq!(cases[0].case_type(), CaseType::FunctionLevel);
    assert_eq!(cases[0].function_filter(), Some("sum_loop"));
}

#[test]
fn cases_without_descriptor_are_aggregated() {
    let temp = tempdir().expect("tempdir");
    make_case(temp.path(), "loops", "sum", "Eq", "old.c", "new.c");

    let cases = discover_cases(temp.path(), ExpectedLabel::Eq).expect("discover");
    assert_eq!(cases[0].case_type(), CaseType::Aggregated);
    assert_eq!(cases[0].function_filter(), None);
}

#[test]
fn broken_descriptor_aborts_discovery() {
    let temp = tempdir().expect("tempdir");
    make_case(temp.path(), "loops", "sum", "Eq", "old.c", "new.c");
    let case_dir = temp.path().join("loops").join("sum").join("Eq");
    fs::write(case_dir.join("case.yaml"), "notes: changed a loop bound\n")
        .expect("write descriptor");

    assert!(discover_cases(temp.path(), ExpectedLabel::Eq).is_err());
}

#[test]
fn missing_root_is_an_error() {
    let temp = tempdir().expect("tempdir");
    assert!(discover_cases(&temp.path().join("nope"), ExpectedLabel::Eq).is_err());
}
